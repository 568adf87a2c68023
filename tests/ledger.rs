//! End-to-end scenarios against the public API.

use pow_ledger::view::ChainSummary;
use pow_ledger::{Blockchain, ChainError, Identity, Transaction};

fn identity() -> Identity {
    Identity::generate().expect("identity")
}

#[test]
fn two_party_exchange_is_valid() -> Result<(), ChainError> {
    let mut chain = Blockchain::new(2);
    let me = identity();
    let you = identity();

    let block = chain.new_block();
    block.append_transaction(&me, you.public_key(), "why hello there!")?;
    block.mine();

    let block = chain.new_block();
    block.append_transaction(&you, me.public_key(), "and hello to you too!")?;
    block.mine();

    assert_eq!(chain.len(), 2);
    assert!(chain.valid());

    for block in &chain {
        assert!(block.hash_hex().starts_with("00"));
        for tx in block.transactions() {
            assert!(tx.verify());
        }
    }
    Ok(())
}

#[test]
fn payload_chain_scenario() {
    let mut chain = Blockchain::new(1);
    for payload in ["a", "b", "c"] {
        chain.add(payload).mine();
    }
    assert_eq!(chain.len(), 3);
    assert!(chain.valid());

    let data: Vec<&[u8]> = chain.iter().map(|b| b.data()).collect();
    assert_eq!(data, vec![b"a".as_slice(), b"b".as_slice(), b"c".as_slice()]);
}

#[test]
fn empty_chain_is_valid() {
    assert!(Blockchain::new(1).valid());
    assert!(Blockchain::new(0).valid());
}

#[test]
fn wrong_identity_cannot_sign() {
    let me = identity();
    let you = identity();
    let mut tx = Transaction::new(me.public_key(), you.public_key(), "hi").expect("tx");

    assert!(matches!(tx.sign(&you), Err(ChainError::NotSender)));
    assert!(!tx.verify());

    tx.sign(&me).expect("sign");
    assert!(tx.verify());
}

#[test]
fn appended_transaction_is_signed_by_its_sender() -> Result<(), ChainError> {
    let mut chain = Blockchain::new(0);
    let me = identity();
    let you = identity();

    let tx = chain.new_block().append_transaction(&you, me.public_key(), "x")?;
    assert_eq!(tx.sender(), you.public_key());
    assert!(tx.verify());
    Ok(())
}

#[test]
fn two_phase_commit() -> Result<(), ChainError> {
    let mut chain = Blockchain::new(1);

    let mut first = chain.prepare_block("first");
    assert!(chain.is_empty());
    first.mine();
    chain.append_mined(first)?;

    let mut second = chain.prepare_block("second");
    second.mine();
    chain.append_mined(second)?;

    assert_eq!(chain.len(), 2);
    assert!(chain.valid());
    Ok(())
}

#[test]
fn shared_public_key_parses_back() {
    let me = identity();
    let shared = me.public_key().to_string();
    let parsed: pow_ledger::PublicKey = shared.parse().expect("parse");
    assert_eq!(parsed, me.public_key());
}

#[test]
fn summary_serializes() {
    let mut chain = Blockchain::new(1);
    chain.add("a").mine();
    let json = serde_json::to_string(&ChainSummary::from(&chain)).expect("json");
    assert!(json.contains("\"valid\":true"));
}

#[test]
fn chain_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Blockchain>();
    assert_send_sync::<Identity>();
}
