#![forbid(unsafe_code)]

mod common;

use solana_sdk::signer::Signer;
use spl_associated_token_account::get_associated_token_address;

use animal_kingdom_client::{
    pda,
    state::{Election, Vote},
    submit::{SubmitConfig, Submitter},
    vote::{cast_vote, fetch_election, fetch_vote, Allocation},
};

use common::{anchor_account_bytes, kp, pk, sample_election, MockChain, MockSender};

const ELECTION_DATE: i64 = 1_677_369_600;

#[tokio::test]
async fn casting_a_vote_submits_once_and_mirrors_the_chain_shape() {
    let program_id = animal_kingdom_client::id();
    let sender = MockSender::default();
    let submitter = Submitter::new(SubmitConfig::default());
    let payer = kp(6);
    let election = sample_election(ELECTION_DATE);
    let (mint, _) = pda::derive_mint(&program_id, "Manta Ray");
    let allocation = Allocation {
        wildlife_protection: 50,
        nature_protection_society: 20,
        marine_life_protection: 30,
    };

    let record = cast_vote(
        &sender,
        &submitter,
        &program_id,
        &payer,
        "Manta Ray",
        &mint,
        &election,
        &allocation,
    )
    .await
    .expect("cast vote");

    assert_eq!(sender.sent_count(), 1);
    assert!(!submitter.is_in_flight());

    // The transaction targets the derived vote account.
    let (election_address, _) = pda::derive_election(&program_id, ELECTION_DATE);
    let (vote_address, _) = pda::derive_vote(&program_id, &mint, &election_address);
    let sent = &sender.sent.lock().expect("lock")[0];
    assert!(sent.message.account_keys.contains(&vote_address));
    assert!(sent.message.account_keys.contains(&mint));

    // The reconstructed record matches the expected on-chain shape.
    assert_eq!(record.desc, "vote");
    assert_eq!(record.mint, mint);
    assert_eq!(record.voter, payer.pubkey());
    assert_eq!(
        record.ata,
        get_associated_token_address(&payer.pubkey(), &mint)
    );
    assert_eq!(record.date, ELECTION_DATE);
    assert_eq!(record.vote.wildlife_protection.amount, 50);
    assert_eq!(
        record.vote.wildlife_protection.organisation_address,
        election.organisations.wildlife_protection.address
    );
    assert_eq!(record.vote.nature_protection_society.amount, 20);
    assert_eq!(record.vote.marine_life_protection.amount, 30);
}

#[tokio::test]
async fn election_and_vote_lookups_distinguish_absent_from_present() {
    let program_id = animal_kingdom_client::id();
    let mut chain = MockChain::default();
    let election = sample_election(ELECTION_DATE);

    // Nothing on chain yet.
    assert!(fetch_election(&chain, &program_id, ELECTION_DATE)
        .await
        .expect("fetch")
        .is_none());

    let (election_address, _) = pda::derive_election(&program_id, ELECTION_DATE);
    chain.accounts.insert(
        election_address,
        anchor_account_bytes(Election::ACCOUNT_NAME, &election, 300),
    );
    let fetched = fetch_election(&chain, &program_id, ELECTION_DATE)
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched, election);

    // No vote yet for this NFT.
    let (mint, _) = pda::derive_mint(&program_id, "Manta Ray");
    assert!(fetch_vote(&chain, &program_id, &mint, &election_address)
        .await
        .expect("fetch")
        .is_none());

    let (vote_address, _) = pda::derive_vote(&program_id, &mint, &election_address);
    let record = Vote {
        desc: "vote".to_string(),
        mint,
        voter: pk(9),
        ata: pk(10),
        date: ELECTION_DATE,
        ..Vote::default()
    };
    chain.accounts.insert(
        vote_address,
        anchor_account_bytes(Vote::ACCOUNT_NAME, &record, 400),
    );
    let fetched = fetch_vote(&chain, &program_id, &mint, &election_address)
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched, record);
}
