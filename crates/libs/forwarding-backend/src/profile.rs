use forwarding_wire::{ForwardingIdentity, Property};
use uuid::Uuid;

/// The identity a backend connection logs in with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProfile {
    pub id: Uuid,
    pub name: String,
    pub properties: Vec<Property>,
}

impl GameProfile {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), properties: Vec::new() }
    }

    /// Profile carrying the proxy-verified uuid, name and properties.
    pub fn from_identity(identity: &ForwardingIdentity) -> Self {
        Self {
            id: identity.uuid(),
            name: identity.username().to_owned(),
            properties: identity.properties().to_vec(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn textures(&self) -> Option<&Property> {
        self.property("textures")
    }
}
