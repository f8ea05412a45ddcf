//! Quota invariants under arbitrary edit sequences.
//!
//! These tests validate:
//! 1. The likes total never exceeds the ceiling after any operation
//! 2. A likes edit only ever changes the edited entry
//! 3. The collection never drops below one entry
//! 4. The running total always equals the sum of entries

use likes_order_form::config::FormConfig;
use likes_order_form::core::{FormError, FormSession, PostId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sum_of_entries(session: &FormSession) -> u32 {
    session.posts().entries().iter().map(|e| e.likes).sum()
}

fn random_id(rng: &mut StdRng, session: &FormSession) -> PostId {
    let entries = session.posts().entries();
    if rng.random_bool(0.1) {
        // Occasionally aim at an id that does not exist.
        return PostId(10_000);
    }
    entries[rng.random_range(0..entries.len())].id
}

fn random_likes_input(rng: &mut StdRng, ceiling: u32) -> String {
    match rng.random_range(0..6) {
        0 => String::new(),
        1 => "-25".to_owned(),
        2 => format!("{}abc", rng.random_range(0..ceiling)),
        3 => rng.random_range(ceiling..ceiling * 3).to_string(),
        _ => rng.random_range(0..=ceiling).to_string(),
    }
}

fn run_random_sequence(ceiling: u32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = FormSession::new(&FormConfig::with_ceiling(ceiling));

    for _ in 0..500 {
        match rng.random_range(0..4) {
            0 => {
                let before = session.posts().len();
                let at_ceiling = session.total_likes() >= ceiling;
                let result = session.add_post();
                if at_ceiling {
                    assert_eq!(result, Err(FormError::QuotaExhausted { ceiling }));
                    assert_eq!(session.posts().len(), before);
                } else {
                    assert!(result.is_ok());
                    assert_eq!(session.posts().len(), before + 1);
                }
            }
            1 => {
                let before = session.posts().len();
                let id = random_id(&mut rng, &session);
                let removed = session.remove_post(id).unwrap();
                if before == 1 {
                    assert!(!removed);
                }
                assert!(session.posts().len() >= 1);
            }
            2 => {
                let id = random_id(&mut rng, &session);
                let before: Vec<_> = session.posts().entries().to_vec();
                let raw = random_likes_input(&mut rng, ceiling);
                match session.update_likes(id, &raw) {
                    Ok(decision) => {
                        assert!(decision.value <= ceiling);
                        for (old, new) in before.iter().zip(session.posts().entries()) {
                            if old.id != id {
                                assert_eq!(old.likes, new.likes, "untouched entry changed");
                            }
                        }
                    }
                    Err(err) => assert_eq!(err, FormError::UnknownPost(id)),
                }
            }
            _ => {
                let id = random_id(&mut rng, &session);
                let _ = session.update_url(id, "https://instagram.com/p/ABC123");
            }
        }

        assert!(session.total_likes() <= ceiling);
        assert_eq!(session.total_likes(), sum_of_entries(&session));
        assert!(!session.posts().is_empty());
    }
}

#[test]
fn test_random_sequences_respect_each_deployed_ceiling() {
    for ceiling in [500, 1000, 2500] {
        for seed in 0..20 {
            run_random_sequence(ceiling, seed);
        }
    }
}

#[test]
fn test_clamp_reports_remaining_likes() {
    let mut session = FormSession::new(&FormConfig::default().with_default_likes(900));
    let second = session.add_post().unwrap();

    let decision = session.update_likes(second, "300").unwrap();

    assert_eq!(decision.value, 100);
    assert_eq!(session.posts().get(second).unwrap().likes, 100);
    assert_eq!(session.posts().get(PostId(1)).unwrap().likes, 900);
    assert_eq!(session.total_likes(), 1000);
    let message = session.error().unwrap().to_string();
    assert!(message.contains("100"), "message was: {message}");
}

#[test]
fn test_add_at_ceiling_leaves_collection_unchanged() {
    let mut session = FormSession::new(&FormConfig::default());
    session.update_likes(PostId(1), "1000").unwrap();

    let err = session.add_post().unwrap_err();

    assert_eq!(err, FormError::QuotaExhausted { ceiling: 1000 });
    assert_eq!(session.posts().len(), 1);
    assert_eq!(session.error(), Some(&err));
}

#[test]
fn test_single_entry_cannot_be_removed() {
    let mut session = FormSession::new(&FormConfig::default());
    assert!(!session.remove_post(PostId(1)).unwrap());
    assert_eq!(session.posts().len(), 1);
    assert_eq!(session.total_likes(), 500);
}
