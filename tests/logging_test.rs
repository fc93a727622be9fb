//! Checks what the gate and timing helpers write to the log.

use std::io;
use std::sync::{Arc, Mutex};

use storefront_policy::timing::measure_execution_time_sync;
use storefront_policy::{
    field_admin_only, is_admin_only, is_anyone, is_authenticated, is_merchant, policy_for, Access,
    AccessGate, Collection, Operation, Principal, RequestMeta, Requirement, Role,
};
use tracing::Level;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_logs(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    capture.contents()
}

#[test]
fn denial_is_logged_with_request_id_but_not_roles() {
    let logs = capture_logs(|| {
        let principal = Principal::new("merchant-7").with_role(Role::Merchant);
        let _ = AccessGate::new(RequestMeta::authenticated("req-log-1", principal))
            .require(Requirement::document(Collection::Merchants, Operation::Delete))
            .check();
    });

    assert!(logs.contains("access denied"), "logs: {}", logs);
    assert!(logs.contains("req-log-1"));
    assert!(logs.contains("merchant-7"));
    assert!(!logs.contains("Merchant)"), "role set leaked: {}", logs);
}

#[test]
fn grant_is_logged_at_debug() {
    let logs = capture_logs(|| {
        AccessGate::new(RequestMeta::anonymous("req-log-2"))
            .require(Requirement::document(Collection::Products, Operation::Read))
            .check()
            .unwrap();
    });

    assert!(logs.contains("DEBUG"));
    assert!(logs.contains("access granted"));
}

#[test]
fn unknown_role_tag_is_warned() {
    let logs = capture_logs(|| {
        let _ = Principal::from_tags(
            "u1",
            ["admn"],
            &storefront_policy::RoleVocabulary::builtin(),
        );
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("dropping unknown role tag"));
}

#[test]
fn timing_reports_label_and_failure() {
    let logs = capture_logs(|| {
        let _: Result<(), &str> = measure_execution_time_sync("sync-report", || Err("x"));
    });

    assert!(logs.contains("[sync-report] Execution time:"), "logs: {}", logs);
    assert!(logs.contains("ms (failed)"));
}

#[test]
fn predicates_and_policies_never_log() {
    let member = Principal::new("member-3");
    let merchant = Principal::new("merchant-3").with_role(Role::Merchant);
    let admin = Principal::new("admin-3").with_role(Role::Admin);
    let principals = [None, Some(&member), Some(&merchant), Some(&admin)];

    let logs = capture_logs(|| {
        assert!(is_anyone());
        for principal in principals {
            let _ = is_authenticated(principal);
            let _ = is_admin_only(principal);
            let _ = is_merchant(principal);
            let _ = field_admin_only(principal);
            for rule in [
                Access::Anyone,
                Access::Authenticated,
                Access::AdminOnly,
                Access::MerchantOnly,
            ] {
                let _ = rule.permits(principal);
            }
            for collection in Collection::ALL {
                for operation in Operation::ALL {
                    let _ = policy_for(collection).permits(operation, principal);
                }
            }
        }
    });

    assert!(logs.is_empty(), "predicates logged: {}", logs);
}
