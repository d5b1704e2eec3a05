//! Shared cw-multi-test fixtures for the controller test suites.
#![allow(dead_code)]

use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use token_bridge::msg::{
    ExecuteMsg, FailedMessageResponse, InstantiateMsg, QueryMsg, StatsResponse,
};
use token_bridge::state::TokenMode;
use token_bridge::TransferPayload;

pub const ADMIN: &str = "terra1admin";
pub const USER: &str = "terra1user";
pub const RECIPIENT: &str = "terra1recipient";
pub const RELAYER: &str = "terra1relayer";
pub const FEE_DENOM: &str = "uluna";

/// Transport chain id of the chain the suite runs on
pub const LOCAL_CHAIN: u16 = 10001;
/// The remote chain the controller is paired with
pub const REMOTE_CHAIN: u16 = 10231;
pub const REMOTE_PATH: &[u8] = b"remote-bridge-path";

pub const SHARED_DECIMALS: u8 = 6;
pub const BASE_FEE: u128 = 1_000;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_bridge::contract::execute,
        token_bridge::contract::instantiate,
        token_bridge::contract::query,
    )
    .with_reply(token_bridge::contract::reply)
    .with_migrate(token_bridge::contract::migrate);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub fn contract_endpoint() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        endpoint_mock::contract::execute,
        endpoint_mock::contract::instantiate,
        endpoint_mock::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Suite
// ============================================================================

pub struct Suite {
    pub app: App,
    pub bridge_code_id: u64,
    pub cw20_code_id: u64,
    pub endpoint: Addr,
    pub bridge: Addr,
    /// 8-decimal MintBurn token, controller is the minter
    pub token_a: Addr,
}

pub fn admin() -> Addr {
    Addr::unchecked(ADMIN)
}

pub fn user() -> Addr {
    Addr::unchecked(USER)
}

pub fn remote_path() -> Binary {
    Binary::from(REMOTE_PATH)
}

pub fn fund_native(app: &mut App, who: &Addr, amount: u128) {
    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, who, coins(amount, FEE_DENOM))
            .unwrap();
    });
}

pub fn instantiate_endpoint(
    app: &mut App,
    chain_id: u16,
    base_fee: u128,
    per_byte_fee: u128,
) -> Addr {
    let code_id = app.store_code(contract_endpoint());
    app.instantiate_contract(
        code_id,
        admin(),
        &endpoint_mock::msg::InstantiateMsg {
            relayer: RELAYER.to_string(),
            chain_id,
            fee_denom: FEE_DENOM.to_string(),
            base_fee: Uint128::new(base_fee),
            per_byte_fee: Uint128::new(per_byte_fee),
        },
        &[],
        "endpoint",
        Some(ADMIN.to_string()),
    )
    .unwrap()
}

pub fn instantiate_bridge(app: &mut App, code_id: u64, endpoint: &Addr) -> Addr {
    app.instantiate_contract(
        code_id,
        admin(),
        &InstantiateMsg {
            admin: ADMIN.to_string(),
            endpoint: endpoint.to_string(),
            fee_denom: FEE_DENOM.to_string(),
            shared_decimals: SHARED_DECIMALS,
        },
        &[],
        "token-bridge",
        Some(ADMIN.to_string()),
    )
    .unwrap()
}

pub fn instantiate_cw20(
    app: &mut App,
    code_id: u64,
    symbol: &str,
    decimals: u8,
    initial_balances: Vec<(&str, u128)>,
    minter: Option<&Addr>,
) -> Addr {
    app.instantiate_contract(
        code_id,
        admin(),
        &cw20_base::msg::InstantiateMsg {
            name: format!("{} Token", symbol),
            symbol: symbol.to_string(),
            decimals,
            initial_balances: initial_balances
                .into_iter()
                .map(|(address, amount)| Cw20Coin {
                    address: address.to_string(),
                    amount: Uint128::new(amount),
                })
                .collect(),
            mint: minter.map(|m| MinterResponse {
                minter: m.to_string(),
                cap: None,
            }),
            marketing: None,
        },
        &[],
        symbol,
        None,
    )
    .unwrap()
}

/// Endpoint, controller paired with `REMOTE_CHAIN`, and token A whitelisted as MintBurn.
pub fn setup() -> Suite {
    let mut app = App::default();
    fund_native(&mut app, &user(), 10_000_000_000);

    let endpoint = instantiate_endpoint(&mut app, LOCAL_CHAIN, BASE_FEE, 0);
    let bridge_code_id = app.store_code(contract_bridge());
    let bridge = instantiate_bridge(&mut app, bridge_code_id, &endpoint);
    let cw20_code_id = app.store_code(contract_cw20());
    let token_a = instantiate_cw20(
        &mut app,
        cw20_code_id,
        "TKNA",
        8,
        vec![(USER, 1_000_000_000)],
        Some(&bridge),
    );

    let mut suite = Suite {
        app,
        bridge_code_id,
        cw20_code_id,
        endpoint,
        bridge,
        token_a,
    };
    let token_a = suite.token_a.clone();
    suite
        .whitelist(&token_a, true, Some(TokenMode::MintBurn))
        .unwrap();
    suite.set_trusted_remote(REMOTE_CHAIN, remote_path()).unwrap();
    suite
}

impl Suite {
    pub fn admin_exec(&mut self, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(admin(), self.bridge.clone(), msg, &[])
    }

    pub fn whitelist(
        &mut self,
        token: &Addr,
        allowed: bool,
        mode: Option<TokenMode>,
    ) -> anyhow::Result<AppResponse> {
        self.admin_exec(&ExecuteMsg::SetWhitelistToken {
            token: token.to_string(),
            allowed,
            mode,
        })
    }

    pub fn set_trusted_remote(
        &mut self,
        chain_id: u16,
        path: Binary,
    ) -> anyhow::Result<AppResponse> {
        self.admin_exec(&ExecuteMsg::SetTrustedRemote { chain_id, path })
    }

    pub fn new_token(
        &mut self,
        symbol: &str,
        decimals: u8,
        initial_balances: Vec<(&str, u128)>,
        mintable: bool,
    ) -> Addr {
        let minter = mintable.then(|| self.bridge.clone());
        instantiate_cw20(
            &mut self.app,
            self.cw20_code_id,
            symbol,
            decimals,
            initial_balances,
            minter.as_ref(),
        )
    }

    pub fn approve(&mut self, owner: &Addr, token: &Addr, amount: u128) {
        self.app
            .execute_contract(
                owner.clone(),
                token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.bridge.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn cw20_transfer(&mut self, from: &Addr, token: &Addr, to: &Addr, amount: u128) {
        self.app
            .execute_contract(
                from.clone(),
                token.clone(),
                &Cw20ExecuteMsg::Transfer {
                    recipient: to.to_string(),
                    amount: Uint128::new(amount),
                },
                &[],
            )
            .unwrap();
    }

    pub fn bridge_token(
        &mut self,
        sender: &Addr,
        token: &Addr,
        amount: u128,
        recipient: Option<&str>,
        fee: u128,
    ) -> anyhow::Result<AppResponse> {
        let funds = if fee > 0 { coins(fee, FEE_DENOM) } else { vec![] };
        self.app.execute_contract(
            sender.clone(),
            self.bridge.clone(),
            &ExecuteMsg::BridgeToken {
                remote_chain_id: REMOTE_CHAIN,
                token: token.to_string(),
                amount: Uint128::new(amount),
                recipient: recipient.map(str::to_string),
                adapter_params: None,
            },
            &funds,
        )
    }

    /// Relay `payload` from the trusted remote path through the endpoint.
    pub fn deliver(&mut self, payload: &Binary) -> anyhow::Result<AppResponse> {
        self.deliver_from(REMOTE_CHAIN, remote_path(), payload)
    }

    pub fn deliver_from(
        &mut self,
        src_chain_id: u16,
        src_address: Binary,
        payload: &Binary,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(RELAYER),
            self.endpoint.clone(),
            &endpoint_mock::msg::ExecuteMsg::Deliver {
                src_chain_id,
                src_address,
                destination: self.bridge.to_string(),
                payload: payload.clone(),
            },
            &[],
        )
    }

    /// Call `LzReceive` as the endpoint with an explicit nonce.
    pub fn lz_receive(&mut self, nonce: u64, payload: &Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.endpoint.clone(),
            self.bridge.clone(),
            &ExecuteMsg::LzReceive {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_path(),
                nonce,
                payload: payload.clone(),
            },
            &[],
        )
    }

    pub fn retry(&mut self, nonce: u64, payload: &Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(RECIPIENT),
            self.bridge.clone(),
            &ExecuteMsg::RetryMessage {
                src_chain_id: REMOTE_CHAIN,
                src_address: remote_path(),
                nonce,
                payload: payload.clone(),
            },
            &[],
        )
    }

    pub fn balance(&self, token: &Addr, who: &str) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: who.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn failed_digest(&self, nonce: u64) -> Binary {
        let res: FailedMessageResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::FailedMessage {
                    src_chain_id: REMOTE_CHAIN,
                    src_address: remote_path(),
                    nonce,
                },
            )
            .unwrap();
        res.digest
    }

    pub fn stats(&self) -> StatsResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.bridge, &QueryMsg::Stats {})
            .unwrap()
    }
}

// ============================================================================
// Payloads
// ============================================================================

pub fn transfer_payload(token: &Addr, recipient: &str, amount: u64) -> Binary {
    let bytes = TransferPayload {
        token: token.to_string(),
        recipient: recipient.to_string(),
        amount,
    }
    .encode()
    .unwrap();
    Binary::from(bytes)
}

pub fn digest(payload: &Binary) -> Binary {
    Binary::from(token_bridge::keccak256(payload.as_slice()).to_vec())
}

pub fn zero_digest() -> Binary {
    Binary::from(vec![0u8; 32])
}

/// Value of `key` on the first custom event of type `ty`.
pub fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    let ty = format!("wasm-{}", ty);
    res.events
        .iter()
        .filter(|e| e.ty == ty)
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

/// Value of `key` on the controller's own `wasm` event.
pub fn wasm_attr(res: &AppResponse, contract: &Addr, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .filter(|e| {
            e.attributes
                .iter()
                .any(|a| a.key == "_contract_address" && a.value == contract.as_str())
        })
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

pub fn assert_err_contains(res: anyhow::Result<AppResponse>, needle: &str) {
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains(needle),
        "Expected error containing {:?}, got: {}",
        needle,
        err_str
    );
}
