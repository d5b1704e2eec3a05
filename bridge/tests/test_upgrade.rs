//! Upgrade lifecycle: admin-authorized migration with state retained.

mod helpers;

use cosmwasm_std::{Addr, Binary};
use cw_multi_test::Executor;

use token_bridge::msg::{
    AuthorizedUpgradeResponse, ConfigResponse, ExecuteMsg, IsWhitelistedResponse, MigrateMsg,
    QueryMsg, TrustedRemoteResponse,
};

use helpers::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn migrate(suite: &mut Suite, new_code_id: u64) -> anyhow::Result<cw_multi_test::AppResponse> {
    let bridge = suite.bridge.clone();
    suite
        .app
        .migrate_contract(admin(), bridge, &MigrateMsg {}, new_code_id)
}

fn authorized(suite: &Suite) -> Option<String> {
    let res: AuthorizedUpgradeResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.bridge, &QueryMsg::AuthorizedUpgrade {})
        .unwrap();
    res.version
}

#[test]
fn test_migrate_without_authorization_fails() {
    let mut suite = setup();
    let new_code_id = suite.app.store_code(contract_bridge());

    let res = migrate(&mut suite, new_code_id);
    assert_err_contains(res, "not authorized");
}

#[test]
fn test_migrate_with_other_version_authorized_fails() {
    let mut suite = setup();
    let new_code_id = suite.app.store_code(contract_bridge());

    suite
        .admin_exec(&ExecuteMsg::AuthorizeUpgrade {
            new_version: "99.0.0".to_string(),
        })
        .unwrap();
    assert_eq!(authorized(&suite).as_deref(), Some("99.0.0"));

    let res = migrate(&mut suite, new_code_id);
    assert_err_contains(res, &format!("Upgrade to version {} not authorized", VERSION));
    // Failed migration leaves the authorization in place
    assert_eq!(authorized(&suite).as_deref(), Some("99.0.0"));
}

#[test]
fn test_authorized_migration_preserves_state() {
    let mut suite = setup();
    let token_a = suite.token_a.clone();
    let token_b = suite.new_token("TKNB", 6, vec![], true);

    // Leave an outstanding failure and an applied message behind
    let failed = transfer_payload(&token_b, RECIPIENT, 1_000_000);
    suite.lz_receive(1, &failed).unwrap();
    let applied = transfer_payload(&token_a, RECIPIENT, 1_000_000);
    suite.lz_receive(2, &applied).unwrap();
    suite
        .set_trusted_remote(7, Binary::from(b"seven".to_vec()))
        .unwrap();

    let new_code_id = suite.app.store_code(contract_bridge());
    suite
        .admin_exec(&ExecuteMsg::AuthorizeUpgrade {
            new_version: VERSION.to_string(),
        })
        .unwrap();
    migrate(&mut suite, new_code_id).unwrap();

    let info = suite.app.contract_data(&suite.bridge).unwrap();
    assert_eq!(info.code_id, new_code_id);

    // Authorization consumed
    assert_eq!(authorized(&suite), None);
    let newer_code_id = suite.app.store_code(contract_bridge());
    assert_err_contains(migrate(&mut suite, newer_code_id), "not authorized");

    // State survived
    let config: ConfigResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.bridge, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.admin, admin());
    assert_eq!(config.endpoint, suite.endpoint);

    let res: TrustedRemoteResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.bridge, &QueryMsg::TrustedRemote { chain_id: 7 })
        .unwrap();
    assert_eq!(res.path, Binary::from(b"seven".to_vec()));

    let res: IsWhitelistedResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.bridge,
            &QueryMsg::IsWhitelisted {
                token: token_a.to_string(),
            },
        )
        .unwrap();
    assert!(res.whitelisted);

    assert_eq!(suite.failed_digest(1), digest(&failed));
    assert_err_contains(suite.lz_receive(2, &applied), "Message already applied");

    // The retry path still works across the upgrade
    suite.whitelist(&token_b, true, None).unwrap();
    suite.retry(1, &failed).unwrap();
    assert_eq!(suite.balance(&token_b, RECIPIENT), 1_000_000);
}

#[test]
fn test_migrate_rejects_foreign_contract() {
    let mut suite = setup();
    let endpoint = suite.endpoint.clone();

    // The endpoint was instantiated with the admin as wasm admin
    let res = suite.app.migrate_contract(
        admin(),
        endpoint,
        &MigrateMsg {},
        suite.bridge_code_id,
    );
    assert_err_contains(res, "Invalid contract name");
}

#[test]
fn test_authorize_upgrade_requires_admin() {
    let mut suite = setup();
    let bridge = suite.bridge.clone();

    let res = suite.app.execute_contract(
        Addr::unchecked(USER),
        bridge,
        &ExecuteMsg::AuthorizeUpgrade {
            new_version: VERSION.to_string(),
        },
        &[],
    );
    assert_err_contains(res, "Unauthorized");
    assert_eq!(authorized(&suite), None);
}
