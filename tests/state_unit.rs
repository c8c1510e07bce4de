#![forbid(unsafe_code)]

mod common;

use borsh::BorshSerialize;

use animal_kingdom_client::{
    error::KingdomError,
    state::{
        account_discriminator, Election, MetadataAccount, NftCustody, Organisation,
        Organisations, OrganisationVote, Vote, VoteBreakdown, METADATA_CREATOR_OFFSET,
    },
    vote::{
        ORG_MARINE_LIFE_PROTECTION, ORG_NATURE_PROTECTION_SOCIETY, ORG_WILDLIFE_PROTECTION,
    },
};

use common::{metadata_account_bytes, pk};

fn sample_election() -> Election {
    Election {
        desc: "election".to_string(),
        date: 1_677_369_600,
        organisations: Organisations {
            wildlife_protection: Organisation {
                name: ORG_WILDLIFE_PROTECTION.to_string(),
                address: pk(1),
                votes: 80,
            },
            nature_protection_society: Organisation {
                name: ORG_NATURE_PROTECTION_SOCIETY.to_string(),
                address: pk(2),
                votes: 20,
            },
            marine_life_protection: Organisation {
                name: ORG_MARINE_LIFE_PROTECTION.to_string(),
                address: pk(3),
                votes: 0,
            },
        },
    }
}

/// Account bytes as the chain lays them out: discriminator, Borsh body,
/// zero padding up to the allocated space.
fn account_bytes<T: BorshSerialize>(name: &str, value: &T, space: usize) -> Vec<u8> {
    let mut data = account_discriminator(name).to_vec();
    data.extend(value.try_to_vec().expect("borsh"));
    assert!(data.len() <= space, "fixture space too small");
    data.resize(space, 0);
    data
}

#[test]
fn election_roundtrips_through_padded_account() {
    let election = sample_election();
    let data = account_bytes(Election::ACCOUNT_NAME, &election, 300);
    assert_eq!(Election::unpack(&data).expect("unpack"), election);
}

#[test]
fn vote_roundtrips_through_padded_account() {
    let vote = Vote {
        desc: "vote".to_string(),
        mint: pk(4),
        voter: pk(5),
        ata: pk(6),
        date: 1_677_369_600,
        vote: VoteBreakdown {
            wildlife_protection: OrganisationVote {
                amount: 50,
                organisation_name: ORG_WILDLIFE_PROTECTION.to_string(),
                organisation_address: pk(1),
            },
            nature_protection_society: OrganisationVote {
                amount: 20,
                organisation_name: ORG_NATURE_PROTECTION_SOCIETY.to_string(),
                organisation_address: pk(2),
            },
            marine_life_protection: OrganisationVote {
                amount: 30,
                organisation_name: ORG_MARINE_LIFE_PROTECTION.to_string(),
                organisation_address: pk(3),
            },
        },
    };
    let data = account_bytes(Vote::ACCOUNT_NAME, &vote, 400);
    assert_eq!(Vote::unpack(&data).expect("unpack"), vote);
}

#[test]
fn custody_record_roundtrips() {
    let custody = NftCustody {
        mint: pk(7),
        conservation_address: pk(8).to_string(),
    };
    let data = account_bytes(NftCustody::ACCOUNT_NAME, &custody, 200);
    assert_eq!(NftCustody::unpack(&data).expect("unpack"), custody);
}

#[test]
fn wrong_discriminator_is_rejected() {
    let election = sample_election();
    let data = account_bytes(Vote::ACCOUNT_NAME, &election, 300);
    assert!(matches!(
        Election::unpack(&data),
        Err(KingdomError::Malformed(_))
    ));
}

#[test]
fn truncated_account_is_rejected() {
    assert!(matches!(
        Election::unpack(&[1, 2, 3]),
        Err(KingdomError::Malformed(_))
    ));

    let election = sample_election();
    let data = account_bytes(Election::ACCOUNT_NAME, &election, 300);
    assert!(Election::unpack(&data[..20]).is_err());
}

#[test]
fn metadata_prefix_decodes_with_null_trimming() {
    let update_authority = pk(9);
    let mint = pk(10);
    let creator = pk(11);
    let data = metadata_account_bytes(
        &update_authority,
        &mint,
        "Manta Ray",
        "$ALKM",
        "https://meta.example/manta.json",
        &creator,
    );

    let decoded = MetadataAccount::unpack(&data).expect("unpack");
    assert_eq!(decoded.update_authority, update_authority);
    assert_eq!(decoded.mint, mint);
    assert_eq!(decoded.name, "Manta Ray");
    assert_eq!(decoded.symbol, "$ALKM");
    assert_eq!(decoded.uri, "https://meta.example/manta.json");
}

#[test]
fn creator_offset_points_at_the_first_creator() {
    let creator = pk(12);
    let data = metadata_account_bytes(&pk(1), &pk(2), "A", "B", "c", &creator);
    assert_eq!(
        &data[METADATA_CREATOR_OFFSET..METADATA_CREATOR_OFFSET + 32],
        creator.as_ref()
    );
}

#[test]
fn metadata_with_oversized_length_is_rejected() {
    let mut data = metadata_account_bytes(&pk(1), &pk(2), "A", "B", "c", &pk(3));
    // Corrupt the name length field beyond its capacity.
    data[65..69].copy_from_slice(&(1000u32).to_le_bytes());
    assert!(matches!(
        MetadataAccount::unpack(&data),
        Err(KingdomError::Malformed(_))
    ));
}

#[test]
fn discriminators_are_stable_and_distinct() {
    let election = account_discriminator("Election");
    let vote = account_discriminator("Vote");
    assert_eq!(election, account_discriminator("Election"));
    assert_ne!(election, vote);
}
