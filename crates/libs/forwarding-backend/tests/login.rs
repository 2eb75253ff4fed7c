use forwarding_backend::{
    ConfigHandle, ForwarderConfig, ForwardingLoginHandler, ForwardingSecret, GameProfile,
    LoginOutcome, LoginSession, RejectReason,
};
use forwarding_wire::{DecodeError, DecodeLimits, ForwardingError, PLAYER_INFO_CHANNEL};
use test_support::alice;
use uuid::Uuid;

const SECRET: &str = "topsecret";

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

fn handler_with(secret: &str, debug: bool) -> (ForwardingLoginHandler, ConfigHandle) {
    let handle = ConfigHandle::new(ForwarderConfig { secret: ForwardingSecret::new(secret), debug });
    (ForwardingLoginHandler::new(handle.clone()), handle)
}

fn offline_session() -> LoginSession {
    LoginSession::new("/198.51.100.7:40112", GameProfile::new(Uuid::from_u128(42), "Alice"))
}

#[test]
fn player_info_request_targets_modern_channel() {
    let query = ForwardingLoginHandler::player_info_request(7);
    assert_eq!(query.message_id, 7);
    assert_eq!(query.channel, PLAYER_INFO_CHANNEL);
    assert_eq!(query.data, vec![1]);
}

#[test]
fn verified_payload_replaces_profile() {
    init_logging();
    let (handler, _) = handler_with(SECRET, true);
    let mut session = offline_session();
    let payload = alice().property("textures", "dGV4", Some("c2ln")).sign(SECRET);

    let outcome = handler.handle_query_response(&mut session, Some(&payload));

    assert_eq!(outcome, LoginOutcome::Accepted);
    assert_eq!(session.profile.id.as_u128(), 0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10);
    assert_eq!(session.profile.name, "Alice");
    assert_eq!(session.profile.textures().map(|p| p.value.as_str()), Some("dGV4"));
    assert_eq!(session.forwarded_address.as_deref(), Some("203.0.113.5"));
}

#[test]
fn wrong_secret_rejects_and_keeps_offline_profile() {
    init_logging();
    let (handler, _) = handler_with("another-secret", false);
    let mut session = offline_session();
    let before = session.profile.clone();

    let outcome = handler.handle_query_response(&mut session, Some(&alice().sign(SECRET)));

    assert_eq!(
        outcome,
        LoginOutcome::Rejected(RejectReason::Forwarding(ForwardingError::SignatureMismatch))
    );
    assert_eq!(session.profile, before);
    assert!(session.forwarded_address.is_none());
}

#[test]
fn malformed_payload_rejects() {
    init_logging();
    let (handler, _) = handler_with(SECRET, false);
    let mut session = offline_session();
    let payload = alice().sign(SECRET);

    let outcome = handler.handle_query_response(&mut session, Some(&payload[..40]));

    assert_eq!(
        outcome,
        LoginOutcome::Rejected(RejectReason::Forwarding(ForwardingError::Malformed(
            DecodeError::Truncated
        )))
    );
    assert!(!outcome.is_accepted());
}

#[test]
fn unsupported_version_rejects() {
    let (handler, _) = handler_with(SECRET, false);
    let mut session = offline_session();
    let payload = alice().version(3).sign(SECRET);
    assert_eq!(
        handler.handle_query_response(&mut session, Some(&payload)),
        LoginOutcome::Rejected(RejectReason::Forwarding(ForwardingError::UnsupportedVersion(3)))
    );
}

#[test]
fn placeholder_secret_rejects_before_decoding() {
    init_logging();
    let (handler, _) = handler_with("CHANGE_ME", false);
    let mut session = offline_session();
    // Even a payload signed with the placeholder must not be accepted.
    let payload = alice().sign("CHANGE_ME");

    let outcome = handler.handle_query_response(&mut session, Some(&payload));

    assert_eq!(outcome, LoginOutcome::Rejected(RejectReason::SecretNotConfigured));
    assert_eq!(session.profile.name, "Alice");
    assert_eq!(session.profile.id, Uuid::from_u128(42));
}

#[test]
fn empty_secret_rejects() {
    let (handler, _) = handler_with("", false);
    let mut session = offline_session();
    assert_eq!(
        handler.handle_query_response(&mut session, Some(&alice().sign(""))),
        LoginOutcome::Rejected(RejectReason::SecretNotConfigured)
    );
}

#[test]
fn missing_response_rejects() {
    let (handler, _) = handler_with(SECRET, false);
    let mut session = offline_session();
    assert_eq!(
        handler.handle_query_response(&mut session, None),
        LoginOutcome::Rejected(RejectReason::MissingForwardingData)
    );
}

#[test]
fn rotated_secret_applies_to_next_login() {
    let (handler, handle) = handler_with(SECRET, false);
    let payload = alice().sign(SECRET);

    assert!(handler.handle_query_response(&mut offline_session(), Some(&payload)).is_accepted());

    handle
        .replace(ForwarderConfig { secret: ForwardingSecret::new("rotated"), debug: false })
        .expect("replace");
    assert!(!handler.handle_query_response(&mut offline_session(), Some(&payload)).is_accepted());
    assert!(handler
        .handle_query_response(&mut offline_session(), Some(&alice().sign("rotated")))
        .is_accepted());
}

#[test]
fn custom_limits_are_applied() {
    let (handler, _) = handler_with(SECRET, false);
    let handler =
        handler.with_limits(DecodeLimits { max_properties: 0, ..DecodeLimits::default() });
    let payload = alice().property("textures", "v", None).sign(SECRET);
    assert!(matches!(
        handler.handle_query_response(&mut offline_session(), Some(&payload)),
        LoginOutcome::Rejected(RejectReason::Forwarding(ForwardingError::Malformed(
            DecodeError::LengthOutOfBounds { declared: 1, limit: 0 }
        )))
    ));
}

#[test]
fn disconnect_messages_distinguish_reasons() {
    let mismatch = RejectReason::Forwarding(ForwardingError::SignatureMismatch);
    let malformed = RejectReason::Forwarding(ForwardingError::Truncated);
    assert_ne!(mismatch.disconnect_message(), malformed.disconnect_message());
    assert_eq!(
        RejectReason::SecretNotConfigured.disconnect_message(),
        RejectReason::ConfigUnavailable.disconnect_message()
    );
    assert!(RejectReason::MissingForwardingData.disconnect_message().contains("proxy"));
}
