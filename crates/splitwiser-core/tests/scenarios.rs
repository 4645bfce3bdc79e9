//! End-to-end scenarios: bills and settlements in, balances and debts out.

use chrono::Utc;
use splitwiser_core::amount::{approx_eq, SETTLE_EPSILON, SPLIT_TOLERANCE};
use splitwiser_core::{
    calculate_group_balances, calculate_group_balances_with, calculate_split, split_bill, Bill,
    CoreError, EngineConfig, GroupBalances, Item, Settlement, SimplifyStrategy,
};

fn people(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn equal_bill(total: f64, participants: &[&str], payer: &str) -> Bill {
    Bill {
        title: None,
        items: vec![],
        total,
        subtotal: total,
        participants: people(participants),
        payer: Some(payer.to_string()),
    }
}

fn settlement(from: &str, to: &str, amount: f64) -> Settlement {
    Settlement {
        id: format!("s-{from}-{to}"),
        group_id: "flat-12".to_string(),
        from: from.to_string(),
        to: to.to_string(),
        amount,
        note: None,
        created_at: Utc::now(),
    }
}

fn net(group: &GroupBalances, member: &str) -> f64 {
    group
        .balance_of(member)
        .map(|balance| balance.net_balance)
        .unwrap_or(0.0)
}

/// Σ incoming − Σ outgoing edges for one member.
fn debt_flow(group: &GroupBalances, member: &str) -> f64 {
    group.debts.iter().fold(0.0, |flow, edge| {
        if edge.to == member {
            flow + edge.amount
        } else if edge.from == member {
            flow - edge.amount
        } else {
            flow
        }
    })
}

#[test]
fn scenario_one_bill_equal_split() {
    let group = calculate_group_balances(&[equal_bill(100.0, &["Alice", "Bob"], "Alice")], &[])
        .unwrap();

    assert_eq!(net(&group, "Alice"), 50.0);
    assert_eq!(net(&group, "Bob"), -50.0);
    assert_eq!(group.debts.len(), 1);
    assert_eq!(group.debts[0].to_string(), "Bob owes Alice $50.00");
}

#[test]
fn scenario_itemized_proportional_tax() {
    let items = vec![
        Item::new("Pizza", 20.0, ["Alice"]),
        Item::new("Salad", 10.0, ["Bob"]),
    ];
    let splits = calculate_split(&items, 33.0, 30.0, &people(&["Alice", "Bob"])).unwrap();

    let alice = &splits["Alice"];
    assert!(approx_eq(alice.subtotal, 20.0, SPLIT_TOLERANCE));
    assert!(approx_eq(alice.tax, 2.0, SPLIT_TOLERANCE));
    assert!(approx_eq(alice.total, 22.0, SPLIT_TOLERANCE));

    let bob = &splits["Bob"];
    assert!(approx_eq(bob.subtotal, 10.0, SPLIT_TOLERANCE));
    assert!(approx_eq(bob.tax, 1.0, SPLIT_TOLERANCE));
    assert!(approx_eq(bob.total, 11.0, SPLIT_TOLERANCE));
}

#[test]
fn scenario_partial_settlement() {
    let group = calculate_group_balances(
        &[equal_bill(100.0, &["Alice", "Bob"], "Alice")],
        &[settlement("Bob", "Alice", 30.0)],
    )
    .unwrap();

    assert_eq!(net(&group, "Bob"), -20.0);
    assert_eq!(group.debts.len(), 1);
    assert_eq!(group.debts[0].from, "Bob");
    assert_eq!(group.debts[0].to, "Alice");
    assert_eq!(group.debts[0].amount, 20.0);
}

#[test]
fn scenario_unassigned_remainder() {
    let bill = Bill {
        title: None,
        items: vec![Item::new("Banana", 10.0, ["Ree"])],
        total: 100.0,
        subtotal: 90.0,
        participants: people(&["Mo", "Ree"]),
        payer: None,
    };
    let result = split_bill(&bill).unwrap();

    assert!(approx_eq(result.splits["Mo"].subtotal, 40.0, SPLIT_TOLERANCE));
    assert!(approx_eq(result.splits["Ree"].subtotal, 50.0, SPLIT_TOLERANCE));

    let total: f64 = result.splits.values().map(|split| split.total).sum();
    assert!(approx_eq(total, 100.0, SPLIT_TOLERANCE));
    assert!(approx_eq(result.tax_amount, 10.0, SPLIT_TOLERANCE));
}

#[test]
fn settlement_moves_exactly_its_amount() {
    let bills = vec![
        equal_bill(90.0, &["Alice", "Bob", "Cara"], "Cara"),
        equal_bill(40.0, &["Alice", "Bob"], "Alice"),
    ];

    let before = calculate_group_balances(&bills, &[]).unwrap();
    let after = calculate_group_balances(&bills, &[settlement("Bob", "Cara", 12.5)]).unwrap();

    assert!(approx_eq(net(&after, "Bob") - net(&before, "Bob"), 12.5, SPLIT_TOLERANCE));
    assert!(approx_eq(net(&after, "Cara") - net(&before, "Cara"), -12.5, SPLIT_TOLERANCE));
    assert!(approx_eq(net(&after, "Alice"), net(&before, "Alice"), SPLIT_TOLERANCE));

    let sum_before: f64 = before.balances.iter().map(|b| b.net_balance).sum();
    let sum_after: f64 = after.balances.iter().map(|b| b.net_balance).sum();
    assert!(approx_eq(sum_before, sum_after, SPLIT_TOLERANCE));
}

#[test]
fn weekend_trip_debts_conserve_balances() {
    let cabin = Bill {
        title: Some("Cabin".to_string()),
        items: vec![],
        total: 480.0,
        subtotal: 450.0,
        participants: people(&["Ana", "Ben", "Cy", "Dee"]),
        payer: Some("Ana".to_string()),
    };
    let groceries = Bill {
        title: None,
        items: vec![
            Item::new("Steak", 60.0, ["Ben", "Cy"]),
            Item::new("Tofu", 12.0, ["Dee"]),
            Item::new("Beer", 36.0, ["Ana", "Ben", "Cy"]),
        ],
        total: 118.8,
        subtotal: 120.0,
        participants: people(&["Ana", "Ben", "Cy", "Dee"]),
        payer: Some("Dee".to_string()),
    };
    let gas = equal_bill(75.0, &["Ana", "Ben", "Cy"], "Cy");
    let unpaid = Bill {
        payer: None,
        ..equal_bill(1000.0, &["Ana", "Ben"], "Ana")
    };

    let group = calculate_group_balances(
        &[cabin, groceries, gas, unpaid],
        &[settlement("Ben", "Ana", 50.0)],
    )
    .unwrap();

    assert_eq!(group.balances.len(), 4);
    let sum: f64 = group.balances.iter().map(|b| b.net_balance).sum();
    assert!(approx_eq(sum, 0.0, SPLIT_TOLERANCE));

    for balance in &group.balances {
        assert!(
            approx_eq(debt_flow(&group, &balance.member), balance.net_balance, SETTLE_EPSILON),
            "{} flow {} != net {}",
            balance.member,
            debt_flow(&group, &balance.member),
            balance.net_balance
        );
    }
    assert!(group.debts.len() <= 3);
}

#[test]
fn largest_first_also_conserves_balances() {
    let bills = vec![
        equal_bill(30.0, &["Ana", "Ben", "Cy"], "Ana"),
        equal_bill(120.0, &["Ana", "Ben", "Cy", "Dee"], "Dee"),
    ];
    let config = EngineConfig::with_strategy(SimplifyStrategy::LargestFirst);

    let group = calculate_group_balances_with(&bills, &[], &config).unwrap();

    for balance in &group.balances {
        assert!(approx_eq(
            debt_flow(&group, &balance.member),
            balance.net_balance,
            SETTLE_EPSILON
        ));
    }
    // Dee fronted the big bill and is the only creditor
    assert_eq!(group.debts[0].to, "Dee");
}

#[test]
fn one_malformed_bill_fails_the_group() {
    let broken = Bill {
        participants: vec![],
        ..equal_bill(10.0, &[], "Ana")
    };

    let err = calculate_group_balances(&[equal_bill(20.0, &["Ana", "Ben"], "Ana"), broken], &[])
        .unwrap_err();

    assert_eq!(err, CoreError::NoParticipants);
    assert!(err.is_client_error());
}

#[test]
fn results_serialize_in_participant_order() {
    let bill = Bill {
        title: None,
        items: vec![],
        total: 30.0,
        subtotal: 30.0,
        participants: people(&["Zoe", "Adam"]),
        payer: None,
    };
    let json = serde_json::to_string(&split_bill(&bill).unwrap()).unwrap();

    let zoe = json.find("\"Zoe\"").unwrap();
    let adam = json.find("\"Adam\"").unwrap();
    assert!(zoe < adam);
}
