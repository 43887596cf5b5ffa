use chrono::{DateTime, Duration, Utc};
use craps_engine::{
    BetSpot, Config, JsonFileSessionStore, MemorySessionStore, Phase, SaveMode, SaveStatus,
    SessionStore, Table,
};
use tempfile::TempDir;

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn played_table() -> Table {
    let mut table = Table::new(Config::default(), t0());
    table.place_bet(BetSpot::PassLine, 10);
    table.roll(2, 2).unwrap();
    table.roll(3, 3).unwrap();
    table.roll(1, 3).unwrap();
    table
}

#[test]
fn test_histories_line_up_after_finalize() {
    let mut table = played_table();
    let record = table.finalize(t0() + Duration::seconds(30)).unwrap();

    assert_eq!(record.roll_count, 3);
    assert_eq!(record.points_made, 1);
    assert_eq!(record.balance_history, vec![1000, 1000, 1000, 1010]);
    assert_eq!(record.bet_size_history, vec![0, 10, 10, 10]);
    assert_eq!(record.ending_balance, 1010);
    assert_eq!(record.net_result(), 10);
}

#[test]
fn test_session_without_rolls_collapses_histories() {
    let mut table = Table::new(Config::default(), t0());
    table.place_bet(BetSpot::Field, 25);
    let record = table.finalize(t0()).unwrap();
    assert_eq!(record.balance_history.len(), 1);
    assert_eq!(record.bet_size_history.len(), 1);
    assert_eq!(record.metrics.total_bets(), 1);
}

#[test]
fn test_repeated_finalize_and_save() {
    let mut store = MemorySessionStore::new();
    let mut table = played_table();
    let end = t0() + Duration::seconds(90);

    let first = table.finalize(end).unwrap().clone();
    let second = table.finalize(end).unwrap().clone();
    assert_eq!(first, second);

    assert_eq!(
        table.save(&mut store, SaveMode::IfUnsaved).unwrap(),
        SaveStatus::Written
    );
    assert_eq!(
        table.save(&mut store, SaveMode::IfUnsaved).unwrap(),
        SaveStatus::Skipped
    );
    assert_eq!(store.write_count(), 1);
    assert_eq!(store.load_latest().unwrap().unwrap(), second);
}

#[test]
fn test_json_store_round_trip_and_resume() {
    let temp = TempDir::new().unwrap();
    let mut store = JsonFileSessionStore::new(temp.path().join("sessions/latest.json"));

    let mut table = played_table();
    table.finalize(t0() + Duration::seconds(60));
    table.save(&mut store, SaveMode::Force).unwrap();
    let saved = table.record().unwrap().clone();

    let loaded = store.load_latest().unwrap().unwrap();
    assert_eq!(loaded, saved);

    let later = t0() + Duration::hours(2);
    let mut resumed = Table::resume(Config::default(), loaded, Phase::ComeOut, later);
    assert_eq!(resumed.balance(), 1010);
    resumed.place_bet(BetSpot::Field, 10);
    resumed.roll(5, 5).unwrap();

    let record = resumed.finalize(later + Duration::seconds(10)).unwrap();
    assert_eq!(record.id, saved.id);
    assert_eq!(record.roll_count, 4);
    assert_eq!(record.active_duration_secs, 70);
    assert_eq!(record.metrics.total_bets(), 2);
    assert_eq!(record.balance_history.len(), record.bet_size_history.len());

    // A resumed session has not been written by this table yet.
    assert_eq!(
        resumed.save(&mut store, SaveMode::IfUnsaved).unwrap(),
        SaveStatus::Written
    );
}

#[test]
fn test_top_up_is_excluded_from_swing() {
    let mut table = Table::new(
        Config {
            starting_balance: 100,
            ..Config::default()
        },
        t0(),
    );
    table.place_bet(BetSpot::Field, 50);
    table.roll(3, 4).unwrap();
    table.top_up(1_000);
    table.place_bet(BetSpot::Field, 20);
    table.roll(1, 2).unwrap();

    let record = table.finalize(t0()).unwrap().clone();
    assert_eq!(record.metrics.atm_visits_count, 1);
    assert_eq!(record.atm_indices, vec![2]);
    assert_eq!(record.balance_history, vec![100, 50, 1070]);
    assert_eq!(table.metrics().biggest_swing(), Some(50));
}

#[test]
fn test_top_up_without_rolls_leaves_no_dangling_mark() {
    let mut table = Table::new(Config::default(), t0());
    table.top_up(500);
    let record = table.finalize(t0()).unwrap();

    assert_eq!(record.balance_history, vec![1000]);
    assert!(record
        .atm_indices
        .iter()
        .all(|i| *i < record.balance_history.len()));
    assert_eq!(record.metrics.atm_visits_count, 1);
    assert_eq!(record.ending_balance, 1500);
}
