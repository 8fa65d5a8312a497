//! tests/parser_tests.rs - Transaction normalization behaviour

#[cfg(test)]
mod tests {
    use crate::xray::{
        attach_parsed, classify, parse_transaction, ActionType, ClassificationFault, ProtonType,
        TransactionKind,
    };
    use serde_json::{json, Value};

    const WALLET: &str = "9ii1FEiWSgDzXAbwj2oTmJXzkfCw78mnHwPQv9WQ5iTn";

    fn transfer(from: &str, to: &str, amount: f64, mint: &str) -> Value {
        json!({ "fromUserAccount": from, "toUserAccount": to, "tokenAmount": amount, "mint": mint })
    }

    fn record(kind: &str) -> Value {
        json!({
            "signature": "5h6xBEauJ3PK6SWCZ1PGjBvj8vDdWG3KpwATGy1ARAXF",
            "type": kind,
            "fee": 5000,
            "timestamp": 1_700_000_000,
            "source": "JUPITER",
        })
    }

    fn with(mut base: Value, key: &str, value: Value) -> Value {
        base[key] = value;
        base
    }

    #[test]
    fn test_transfer_sent_by_address() {
        let raw = with(record("TRANSFER"), "tokenTransfers", json!([transfer("A", "B", 5.0, "M")]));
        let parsed = parse_transaction(&raw, Some("A"));

        assert_eq!(parsed.kind, ProtonType::Transfer);
        assert_eq!(parsed.actions.len(), 1);
        let action = &parsed.actions[0];
        assert_eq!(action.action_type, ActionType::Sent);
        assert_eq!(action.from, "A");
        assert_eq!(action.to, "B");
        assert_eq!(json!(action.amount), json!(5.0));
        assert_eq!(action.sent, None);
        assert_eq!(action.received, None);
    }

    #[test]
    fn test_transfer_received_by_address() {
        let raw = with(record("TRANSFER"), "tokenTransfers", json!([transfer("A", "B", 5.0, "M")]));
        let parsed = parse_transaction(&raw, Some("B"));

        assert_eq!(parsed.actions[0].action_type, ActionType::Received);
    }

    #[test]
    fn test_transfer_carries_base_fields() {
        let raw = with(record("TRANSFER"), "tokenTransfers", json!([]));
        let parsed = parse_transaction(&raw, Some(WALLET));

        assert_eq!(parsed.kind, ProtonType::Transfer);
        assert!(parsed.actions.is_empty());
        assert!(parsed.accounts.is_empty());
        assert_eq!(parsed.primary_user, WALLET);
        assert_eq!(json!(parsed.fee), json!(5000));
        assert_eq!(json!(parsed.timestamp), json!(1_700_000_000));
        assert_eq!(parsed.source, "JUPITER");
        assert_eq!(parsed.raw, raw);
    }

    #[test]
    fn test_transfer_without_token_transfers_key() {
        let parsed = parse_transaction(&record("TRANSFER"), Some(WALLET));

        assert_eq!(parsed.kind, ProtonType::Transfer);
        assert!(parsed.actions.is_empty());
        assert_eq!(parsed.primary_user, WALLET);
        assert_eq!(parsed.signature, "5h6xBEauJ3PK6SWCZ1PGjBvj8vDdWG3KpwATGy1ARAXF");
        assert_eq!(parsed.source, "JUPITER");
    }

    #[test]
    fn test_numbers_are_carried_verbatim() {
        let raw = json!({
            "signature": "sig",
            "type": "NFT_SALE",
            "fee": 5000,
            "timestamp": 1_700_000_000.0,
            "nativeTransfers": [{ "fromUserAccount": "A", "toUserAccount": "B", "amount": 1_000_000 }]
        });
        let parsed = parse_transaction(&raw, None);

        assert_eq!(parsed.kind, ProtonType::NftSale);
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["fee"], json!(5000));
        assert_eq!(value["timestamp"], json!(1_700_000_000.0));
        assert_eq!(value["actions"][0]["amount"], json!(1_000_000));
        assert_eq!(value["fee"].to_string(), "5000");
        assert_eq!(value["actions"][0]["amount"].to_string(), "1000000");
    }

    #[test]
    fn test_transfer_preserves_order_and_defaults_addresses() {
        let raw = with(
            record("TRANSFER"),
            "tokenTransfers",
            json!([
                transfer("A", "B", 1.0, "M"),
                { "toUserAccount": "A", "tokenAmount": 2.0, "mint": "M" },
                { "fromUserAccount": "A", "tokenAmount": 3.0 }
            ]),
        );
        let parsed = parse_transaction(&raw, Some("A"));

        let amounts: Vec<Value> = parsed.actions.iter().map(|a| json!(a.amount)).collect();
        assert_eq!(amounts, vec![json!(1.0), json!(2.0), json!(3.0)]);
        assert_eq!(parsed.actions[1].from, "unknown");
        assert_eq!(parsed.actions[1].action_type, ActionType::Received);
        assert_eq!(parsed.actions[2].to, "unknown");
        assert_eq!(parsed.actions[2].action_type, ActionType::Sent);
    }

    #[test]
    fn test_swap_pairs_first_legs() {
        let raw = with(
            record("SWAP"),
            "tokenTransfers",
            json!([transfer("A", "X", 10.0, "M1"), transfer("Y", "A", 20.0, "M2")]),
        );
        let parsed = parse_transaction(&raw, Some("A"));

        assert_eq!(parsed.kind, ProtonType::Swap);
        assert_eq!(parsed.actions.len(), 1);
        let action = &parsed.actions[0];
        assert_eq!(action.action_type, ActionType::Swap);
        assert_eq!(action.from, "A");
        assert_eq!(action.to, "A");
        assert_eq!(action.sent.as_deref(), Some("M1"));
        assert_eq!(action.received.as_deref(), Some("M2"));
        assert_eq!(json!(action.amount), json!(10.0));
    }

    #[test]
    fn test_swap_multi_leg_uses_first_match() {
        let raw = with(
            record("SWAP"),
            "tokenTransfers",
            json!([
                transfer("Y", "A", 20.0, "M2"),
                transfer("A", "X", 10.0, "M1"),
                transfer("A", "Z", 30.0, "M3"),
                transfer("W", "A", 40.0, "M4")
            ]),
        );
        let parsed = parse_transaction(&raw, Some("A"));

        assert_eq!(parsed.actions.len(), 1);
        assert_eq!(parsed.actions[0].sent.as_deref(), Some("M1"));
        assert_eq!(parsed.actions[0].received.as_deref(), Some("M2"));
        assert_eq!(json!(parsed.actions[0].amount), json!(10.0));
    }

    #[test]
    fn test_swap_with_only_sent_leg_has_no_actions() {
        let raw = with(record("SWAP"), "tokenTransfers", json!([transfer("A", "X", 10.0, "M1")]));
        let parsed = parse_transaction(&raw, Some("A"));

        assert_eq!(parsed.kind, ProtonType::Swap);
        assert!(parsed.actions.is_empty());
    }

    #[test]
    fn test_swap_without_transfers() {
        let parsed = parse_transaction(&record("SWAP"), Some("A"));
        assert_eq!(parsed.kind, ProtonType::Swap);
        assert!(parsed.actions.is_empty());
    }

    #[test]
    fn test_nft_sale_native_transfers() {
        let raw = with(
            record("NFT_SALE"),
            "nativeTransfers",
            json!([{ "fromUserAccount": "A", "toUserAccount": "B", "amount": 1_000_000 }]),
        );
        let parsed = parse_transaction(&raw, None);

        assert_eq!(parsed.kind, ProtonType::NftSale);
        assert_eq!(parsed.primary_user, "");
        assert_eq!(parsed.actions.len(), 1);
        let action = &parsed.actions[0];
        assert_eq!(action.action_type, ActionType::NftSale);
        assert_eq!(action.from, "A");
        assert_eq!(action.to, "B");
        assert_eq!(json!(action.amount), json!(1_000_000));
    }

    #[test]
    fn test_nft_sale_without_native_transfers() {
        let parsed = parse_transaction(&record("NFT_SALE"), None);
        assert_eq!(parsed.kind, ProtonType::NftSale);
        assert!(parsed.actions.is_empty());
    }

    #[test]
    fn test_unknown_types_use_template() {
        for kind in [json!("BURN"), json!("COMPRESSED_NFT_MINT"), json!(null)] {
            let raw = with(record("TRANSFER"), "type", kind.clone());
            let raw = with(raw, "tokenTransfers", json!([transfer("A", "B", 5.0, "M")]));
            let parsed = parse_transaction(&raw, Some("A"));

            assert_eq!(parsed.kind, ProtonType::Unknown, "type {}", kind);
            assert!(parsed.actions.is_empty());
            assert_eq!(parsed.signature, "5h6xBEauJ3PK6SWCZ1PGjBvj8vDdWG3KpwATGy1ARAXF");
            assert_eq!(json!(parsed.timestamp), json!(1_700_000_000));
            assert_eq!(parsed.primary_user, "A");
            assert_eq!(parsed.raw, raw);
            assert_eq!(json!(parsed.fee), json!(0));
            assert_eq!(parsed.source, "SYSTEM_PROGRAM");
        }
    }

    #[test]
    fn test_missing_type_and_defaults() {
        let raw = json!({ "signature": "sig" });
        let parsed = parse_transaction(&raw, None);

        assert_eq!(parsed.kind, ProtonType::Unknown);
        assert_eq!(json!(parsed.timestamp), json!(0));
        assert_eq!(json!(parsed.fee), json!(0));
        assert_eq!(parsed.primary_user, "");
        assert_eq!(parsed.source, "SYSTEM_PROGRAM");
    }

    #[test]
    fn test_malformed_record_degrades_to_unknown() {
        let raw = json!({
            "signature": "sig",
            "type": "TRANSFER",
            "timestamp": 42,
            "tokenTransfers": "not a list",
        });
        let parsed = parse_transaction(&raw, Some("A"));

        assert_eq!(parsed.kind, ProtonType::Unknown);
        assert_eq!(parsed.signature, "sig");
        assert_eq!(json!(parsed.timestamp), json!(42));
        assert_eq!(parsed.primary_user, "A");
        assert!(parsed.actions.is_empty());
        assert_eq!(parsed.raw, raw);
    }

    #[test]
    fn test_non_object_record_degrades_to_unknown() {
        for raw in [json!(null), json!("text"), json!([1, 2, 3])] {
            let parsed = parse_transaction(&raw, None);
            assert_eq!(parsed.kind, ProtonType::Unknown);
            assert_eq!(parsed.signature, "");
            assert_eq!(json!(parsed.timestamp), json!(0));
        }
    }

    #[test]
    fn test_malformed_shape_is_a_fault() {
        let raw = with(record("TRANSFER"), "fee", json!("5000 lamports"));
        assert!(matches!(classify(&raw, Some("A")), Err(ClassificationFault::Malformed(_))));

        let parsed = parse_transaction(&raw, Some("A"));
        assert_eq!(parsed.kind, ProtonType::Unknown);
        assert_eq!(json!(parsed.timestamp), json!(1_700_000_000));
    }

    #[test]
    fn test_transfer_without_amount_keeps_classification() {
        let raw = with(
            record("TRANSFER"),
            "tokenTransfers",
            json!([transfer("A", "B", 5.0, "M"), { "fromUserAccount": "A", "toUserAccount": "C" }]),
        );
        let parsed = parse_transaction(&raw, Some("A"));

        assert_eq!(parsed.kind, ProtonType::Transfer);
        assert_eq!(parsed.actions.len(), 2);
        assert_eq!(json!(parsed.actions[0].amount), json!(5.0));
        assert_eq!(parsed.actions[1].amount, None);
        assert_eq!(parsed.actions[1].to, "C");

        let value = serde_json::to_value(&parsed).unwrap();
        assert!(value["actions"][1].get("amount").is_none());
    }

    #[test]
    fn test_swap_and_nft_sale_without_amount_keep_classification() {
        let swap = with(
            record("SWAP"),
            "tokenTransfers",
            json!([{ "fromUserAccount": "A", "toUserAccount": "X", "mint": "M1" },
                   transfer("Y", "A", 20.0, "M2")]),
        );
        let parsed = parse_transaction(&swap, Some("A"));
        assert_eq!(parsed.kind, ProtonType::Swap);
        assert_eq!(parsed.actions.len(), 1);
        assert_eq!(parsed.actions[0].amount, None);

        let sale = with(
            record("NFT_SALE"),
            "nativeTransfers",
            json!([{ "fromUserAccount": "A", "toUserAccount": "B" }]),
        );
        let parsed = parse_transaction(&sale, None);
        assert_eq!(parsed.kind, ProtonType::NftSale);
        assert_eq!(parsed.actions.len(), 1);
        assert_eq!(parsed.actions[0].amount, None);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let raw = with(
            record("SWAP"),
            "tokenTransfers",
            json!([transfer("A", "X", 10.0, "M1"), transfer("Y", "A", 20.0, "M2")]),
        );
        assert_eq!(parse_transaction(&raw, Some("A")), parse_transaction(&raw, Some("A")));
    }

    #[test]
    fn test_transaction_kind_dispatch() {
        assert_eq!(TransactionKind::from_provider(Some("TRANSFER")), TransactionKind::Transfer);
        assert_eq!(TransactionKind::from_provider(Some("SWAP")), TransactionKind::Swap);
        assert_eq!(TransactionKind::from_provider(Some("NFT_SALE")), TransactionKind::NftSale);
        assert_eq!(
            TransactionKind::from_provider(Some("STAKE_SOL")),
            TransactionKind::Unhandled(ProtonType::StakeSol)
        );
        assert_eq!(
            TransactionKind::from_provider(Some("ADD_LIQUIDITY")),
            TransactionKind::Unclassified("ADD_LIQUIDITY".to_string())
        );
        assert_eq!(
            TransactionKind::from_provider(None),
            TransactionKind::Unclassified(String::new())
        );
    }

    #[test]
    fn test_serialized_shape() {
        let raw = with(
            record("SWAP"),
            "tokenTransfers",
            json!([transfer("A", "X", 10.0, "M1"), transfer("Y", "A", 20.0, "M2")]),
        );
        let value = serde_json::to_value(parse_transaction(&raw, Some("A"))).unwrap();

        assert_eq!(value["type"], json!("SWAP"));
        assert_eq!(value["primaryUser"], json!("A"));
        assert_eq!(value["accounts"], json!([]));
        assert_eq!(value["actions"][0]["actionType"], json!("SWAP"));
        assert_eq!(value["actions"][0]["sent"], json!("M1"));
        assert_eq!(value["raw"], raw);

        let transfer_value = serde_json::to_value(parse_transaction(
            &with(record("TRANSFER"), "tokenTransfers", json!([transfer("A", "B", 1.0, "M")])),
            Some("A"),
        ))
        .unwrap();
        assert!(transfer_value["actions"][0].get("sent").is_none());
        assert_eq!(transfer_value["actions"][0]["actionType"], json!("SENT"));
    }

    #[test]
    fn test_attach_parsed_top_level_items() {
        let body = json!({
            "success": true,
            "items": [
                with(record("TRANSFER"), "tokenTransfers", json!([transfer(WALLET, "B", 1.0, "M")])),
                record("BURN")
            ]
        });
        let body = attach_parsed(body, Some(WALLET));

        assert_eq!(body["success"], json!(true));
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["raw"]["type"], json!("TRANSFER"));
        assert_eq!(items[0]["parsed"]["actions"][0]["actionType"], json!("SENT"));
        assert_eq!(items[1]["parsed"]["type"], json!("UNKNOWN"));
    }

    #[test]
    fn test_attach_parsed_nested_items() {
        let body = json!({ "data": { "items": [record("SWAP")], "hasNext": false } });
        let body = attach_parsed(body, None);

        assert_eq!(body["data"]["hasNext"], json!(false));
        assert_eq!(body["data"]["items"][0]["parsed"]["type"], json!("SWAP"));
    }

    #[test]
    fn test_attach_parsed_without_items_passes_through() {
        let body = json!({ "data": { "price": 1.5 } });
        assert_eq!(attach_parsed(body.clone(), None), body);
    }
}
