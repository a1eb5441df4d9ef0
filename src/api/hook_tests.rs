use super::{AutoReconnect, Hook};
use serde_json::json;

fn audit() -> Hook {
    Hook {
        name: "audit".to_string(),
        enable: true,
        url: "http://127.0.0.1:9000".to_string(),
        request_timeout: "5s".to_string(),
        failed_action: "deny".to_string(),
        auto_reconnect: Some(AutoReconnect::interval("60s")),
        pool_size: 8,
    }
}

#[test]
fn serializes_all_fields() {
    assert_eq!(
        serde_json::to_value(audit()).unwrap(),
        json!({
            "name": "audit",
            "enable": true,
            "url": "http://127.0.0.1:9000",
            "request_timeout": "5s",
            "failed_action": "deny",
            "auto_reconnect": "60s",
            "pool_size": 8
        })
    );
}

#[test]
fn omits_empty_optional_fields() {
    let hook = Hook {
        request_timeout: String::new(),
        failed_action: String::new(),
        auto_reconnect: None,
        ..audit()
    };

    assert_eq!(
        serde_json::to_value(hook).unwrap(),
        json!({
            "name": "audit",
            "enable": true,
            "url": "http://127.0.0.1:9000",
            "pool_size": 8
        })
    );
}

#[test]
fn deserialization_ignores_server_side_fields() {
    let hook: Hook = serde_json::from_value(json!({
        "name": "audit",
        "enable": true,
        "url": "http://127.0.0.1:9000",
        "pool_size": 8,
        "node_status": [{ "node": "emqx@127.0.0.1", "status": "connected" }],
        "metrics": { "succeed": 3, "failed": 0 }
    }))
    .unwrap();

    assert_eq!(
        hook,
        Hook {
            request_timeout: String::new(),
            failed_action: String::new(),
            auto_reconnect: None,
            ..audit()
        }
    );
}

#[test]
fn empty_object_yields_default_hook() {
    let hook: Hook = serde_json::from_str("{}").unwrap();
    assert_eq!(hook, Hook::default());
}

mod auto_reconnect {
    use super::*;

    #[test]
    fn decodes_disabled_flag() {
        let hook: Hook = serde_json::from_str(
            r#"{"name":"audit","enable":true,"url":"http://127.0.0.1:9000","auto_reconnect":false,"pool_size":8}"#,
        )
        .unwrap();

        assert_eq!(hook.auto_reconnect, Some(AutoReconnect::disabled()));
        assert!(!hook.auto_reconnect.unwrap().is_enabled());
    }

    #[test]
    fn disabled_flag_survives_encode_and_decode() {
        let hook = Hook {
            auto_reconnect: Some(AutoReconnect::disabled()),
            ..audit()
        };

        let value = serde_json::to_value(&hook).unwrap();
        assert_eq!(value["auto_reconnect"], json!(false));

        let decoded: Hook = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, hook);
    }

    #[test]
    fn decodes_interval() {
        let hook: Hook = serde_json::from_value(json!({ "auto_reconnect": "30s" })).unwrap();

        assert_eq!(hook.auto_reconnect, Some(AutoReconnect::interval("30s")));
        assert!(hook.auto_reconnect.unwrap().is_enabled());
    }

    #[test]
    fn displays_wire_form() {
        assert_eq!(AutoReconnect::disabled().to_string(), "false");
        assert_eq!(AutoReconnect::interval("60s").to_string(), "60s");
    }
}
