use super::persistence::{record_key, StoragePort};
use super::StoreError;
use crate::models::{HealthRecord, SeriesPoint, VitalKind};

/// Default trend window: the dashboard charts the last 7 entries.
pub const DEFAULT_WINDOW: usize = 7;

/// What `open` found in persistence. A warning means the store started
/// from an empty sequence even though something was stored — the
/// session continues, but the caller should tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub records_loaded: usize,
    pub warning: Option<String>,
}

/// Owns the full record sequence for one user.
///
/// The store is the sole writer: appends go through `&mut self`, so a
/// session cannot interleave two saves of the same sequence. Records
/// are totally ordered by (date, insertion sequence); same-day records
/// keep their insertion order and are never re-sorted by value.
pub struct HealthRecordStore {
    storage: Box<dyn StoragePort>,
    key: String,
    user_id: String,
    /// Insertion order. Dates may arrive out of order; reads sort by
    /// (date, insertion index) without touching this sequence.
    records: Vec<HealthRecord>,
}

impl HealthRecordStore {
    /// Load the user's sequence from persistence. Construction never
    /// fails: a missing key means a fresh history, and unreadable or
    /// schema-mismatched data degrades to an empty sequence with a
    /// recoverable warning in the report.
    pub fn open(storage: Box<dyn StoragePort>, user_id: &str) -> (Self, LoadReport) {
        let key = record_key(user_id);

        let (records, warning) = match storage.load(&key) {
            Ok(None) => (Vec::new(), None),
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<HealthRecord>>(&bytes) {
                Ok(records) => (records, None),
                Err(err) => {
                    tracing::warn!(
                        user_id,
                        error = %err,
                        "stored health records unreadable, starting from empty history"
                    );
                    (
                        Vec::new(),
                        Some(format!("Stored health records could not be read: {err}")),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(
                    user_id,
                    error = %err,
                    "persistence unavailable on load, starting from empty history"
                );
                (
                    Vec::new(),
                    Some(format!("Health records could not be loaded: {err}")),
                )
            }
        };

        let report = LoadReport {
            records_loaded: records.len(),
            warning,
        };

        tracing::info!(user_id, records = report.records_loaded, "health record store opened");

        (
            Self {
                storage,
                key,
                user_id: user_id.to_string(),
                records,
            },
            report,
        )
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and persist the full updated sequence.
    ///
    /// Duplicate dates are valid and additive. On a save failure the
    /// record stays in the in-memory view and the error is surfaced, so
    /// a later [`flush`](Self::flush) can retry without re-entry.
    pub fn append(&mut self, record: HealthRecord) -> Result<(), StoreError> {
        self.records.push(record);
        self.flush()
    }

    /// Re-attempt the durable save of the current sequence. Called by
    /// `append`, by retry paths after a persistence failure, and at
    /// logout.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&self.records)?;
        self.storage.save(&self.key, &bytes)?;
        Ok(())
    }

    /// The record with the greatest (date, insertion-order) key.
    pub fn latest(&self) -> Option<&HealthRecord> {
        self.records
            .iter()
            .enumerate()
            .max_by_key(|(idx, record)| (record.date, *idx))
            .map(|(_, record)| record)
    }

    /// The most recent `window_size` entries that define a value for
    /// `vital`, oldest first — charting consumers assume an ascending
    /// x-axis. Fewer qualifying records than the window yields all of
    /// them, with no padding or interpolation.
    ///
    /// Computed fresh against current state on every call; the stored
    /// sequence is never reordered.
    pub fn recent_series(&self, vital: VitalKind, window_size: usize) -> Vec<SeriesPoint> {
        let mut qualifying: Vec<(usize, &HealthRecord, f64, Option<f64>)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                record
                    .vital_value(vital)
                    .map(|(value, secondary)| (idx, record, value, secondary))
            })
            .collect();

        qualifying.sort_by_key(|&(idx, record, _, _)| (record.date, idx));

        let start = qualifying.len().saturating_sub(window_size);
        qualifying[start..]
            .iter()
            .map(|&(_, record, value, value_secondary)| SeriesPoint {
                date: record.date,
                value,
                value_secondary,
            })
            .collect()
    }

    /// Read-only snapshot of the full sequence, in insertion order.
    /// Mutating the returned vector does not affect store state.
    pub fn all(&self) -> Vec<HealthRecord> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::RiskLevel;
    use crate::store::MemoryStorage;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn open_empty(user: &str) -> HealthRecordStore {
        let (store, report) = HealthRecordStore::open(Box::new(MemoryStorage::new()), user);
        assert_eq!(report.records_loaded, 0);
        assert!(report.warning.is_none());
        store
    }

    fn hr(d: u32, bpm: u32) -> HealthRecord {
        HealthRecord::new(day(d)).with_heart_rate(bpm)
    }

    // ───────────────────────────────────────
    // open / persistence
    // ───────────────────────────────────────

    #[test]
    fn open_with_no_stored_data_is_empty() {
        let store = open_empty("u-1");
        assert!(store.is_empty());
        assert!(store.latest().is_none());
    }

    #[test]
    fn sequence_round_trips_through_persistence() {
        let storage = MemoryStorage::new();
        let expected = {
            let (mut store, _) = HealthRecordStore::open(Box::new(storage), "u-1");
            store.append(hr(3, 70)).unwrap();
            store.append(hr(1, 75)).unwrap();
            store
                .append(HealthRecord::new(day(2)).with_blood_pressure(130, 82))
                .unwrap();
            store.all()
        };

        // Reload from the persisted bytes via a seeded second adapter.
        let bytes = serde_json::to_vec(&expected).unwrap();
        let storage = MemoryStorage::new();
        storage.seed("records/u-1", bytes);
        let (reloaded, report) = HealthRecordStore::open(Box::new(storage), "u-1");

        assert_eq!(report.records_loaded, 3);
        assert!(report.warning.is_none());
        // Same dates, same field values, same relative order.
        assert_eq!(reloaded.all(), expected);
    }

    #[test]
    fn corrupt_stored_data_degrades_to_empty_with_warning() {
        let storage = MemoryStorage::new();
        storage.seed("records/u-1", b"{not json".to_vec());
        let (mut store, report) = HealthRecordStore::open(Box::new(storage), "u-1");

        assert!(store.is_empty());
        assert!(report.warning.is_some());

        // The store stays usable for the rest of the session.
        store.append(hr(1, 70)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn schema_mismatched_data_degrades_to_empty_with_warning() {
        let storage = MemoryStorage::new();
        storage.seed("records/u-1", br#"[{"unexpected": true}]"#.to_vec());
        let (store, report) = HealthRecordStore::open(Box::new(storage), "u-1");
        assert!(store.is_empty());
        assert!(report.warning.is_some());
    }

    #[test]
    fn users_have_independent_sequences() {
        let (mut store_a, _) = HealthRecordStore::open(Box::new(MemoryStorage::new()), "u-a");
        store_a.append(hr(1, 70)).unwrap();
        let store_b = open_empty("u-b");
        assert!(store_b.is_empty());
        assert_eq!(store_a.user_id(), "u-a");
    }

    // ───────────────────────────────────────
    // append / latest ordering
    // ───────────────────────────────────────

    #[test]
    fn latest_follows_date_then_insertion_order() {
        let mut store = open_empty("u-1");
        store.append(hr(5, 70)).unwrap();
        let newest = hr(9, 72);
        let newest_id = newest.id;
        store.append(newest).unwrap();

        assert_eq!(store.latest().unwrap().id, newest_id);

        // Appending an earlier-dated record does not change latest().
        store.append(hr(2, 80)).unwrap();
        assert_eq!(store.latest().unwrap().id, newest_id);
    }

    #[test]
    fn same_day_records_tie_break_by_insertion() {
        let mut store = open_empty("u-1");
        store.append(hr(4, 90)).unwrap();
        let second_today = hr(4, 60);
        let second_id = second_today.id;
        store.append(second_today).unwrap();

        // Insertion order wins, never the value.
        assert_eq!(store.latest().unwrap().id, second_id);
    }

    #[test]
    fn duplicate_dates_are_additive() {
        let mut store = open_empty("u-1");
        store.append(hr(4, 70)).unwrap();
        store.append(hr(4, 71)).unwrap();
        store.append(hr(4, 72)).unwrap();
        assert_eq!(store.len(), 3);
    }

    // ───────────────────────────────────────
    // recent_series windowing
    // ───────────────────────────────────────

    #[test]
    fn series_is_bounded_ascending_and_filtered() {
        let mut store = open_empty("u-1");
        for d in 1..=10 {
            store.append(hr(d, 60 + d)).unwrap();
        }
        // Non-qualifying record must not appear in the heart-rate series.
        store
            .append(HealthRecord::new(day(11)).with_weight(70.0))
            .unwrap();

        let series = store.recent_series(VitalKind::HeartRate, DEFAULT_WINDOW);
        assert_eq!(series.len(), 7);
        assert_eq!(series.first().unwrap().date, day(4));
        assert_eq!(series.last().unwrap().date, day(10));
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn series_with_fewer_records_is_unpadded() {
        let mut store = open_empty("u-1");
        store.append(hr(1, 61)).unwrap();
        store.append(hr(2, 62)).unwrap();
        store.append(hr(3, 63)).unwrap();

        let series = store.recent_series(VitalKind::HeartRate, 7);
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![61.0, 62.0, 63.0]
        );
    }

    #[test]
    fn series_sorts_out_of_order_dates_without_reordering_store() {
        let mut store = open_empty("u-1");
        store.append(hr(5, 65)).unwrap();
        store.append(hr(1, 61)).unwrap();
        store.append(hr(3, 63)).unwrap();

        let series = store.recent_series(VitalKind::HeartRate, 7);
        assert_eq!(
            series.iter().map(|p| p.date).collect::<Vec<_>>(),
            vec![day(1), day(3), day(5)]
        );

        // Underlying sequence keeps insertion order.
        let all = store.all();
        assert_eq!(all[0].date, day(5));
        assert_eq!(all[1].date, day(1));
    }

    #[test]
    fn same_day_series_entries_keep_insertion_order() {
        let mut store = open_empty("u-1");
        store.append(hr(4, 90)).unwrap();
        store.append(hr(4, 60)).unwrap();

        let series = store.recent_series(VitalKind::HeartRate, 7);
        assert_eq!(
            series.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![90.0, 60.0]
        );
    }

    #[test]
    fn blood_pressure_series_pairs_systolic_and_diastolic() {
        let mut store = open_empty("u-1");
        store
            .append(HealthRecord::new(day(1)).with_blood_pressure(120, 80))
            .unwrap();
        store
            .append(HealthRecord::new(day(2)).with_blood_pressure(135, 85))
            .unwrap();

        let series = store.recent_series(VitalKind::BloodPressure, 7);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].value, 135.0);
        assert_eq!(series[1].value_secondary, Some(85.0));
    }

    #[test]
    fn series_is_a_live_view_not_a_cache() {
        let mut store = open_empty("u-1");
        store.append(hr(1, 61)).unwrap();
        assert_eq!(store.recent_series(VitalKind::HeartRate, 7).len(), 1);

        store.append(hr(2, 62)).unwrap();
        let series = store.recent_series(VitalKind::HeartRate, 7);
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().value, 62.0);
    }

    #[test]
    fn zero_window_yields_empty_series() {
        let mut store = open_empty("u-1");
        store.append(hr(1, 61)).unwrap();
        assert!(store.recent_series(VitalKind::HeartRate, 0).is_empty());
    }

    // ───────────────────────────────────────
    // all() snapshot
    // ───────────────────────────────────────

    #[test]
    fn all_returns_defensive_copy() {
        let mut store = open_empty("u-1");
        store.append(hr(1, 61)).unwrap();

        let mut snapshot = store.all();
        snapshot.clear();
        snapshot.push(hr(9, 99).with_risk(RiskLevel::High, 95));

        assert_eq!(store.len(), 1);
        assert_eq!(store.latest().unwrap().date, day(1));
    }

    // ───────────────────────────────────────
    // persistence failure / retry
    // ───────────────────────────────────────

    #[test]
    fn failed_save_keeps_record_in_memory_for_retry() {
        let backend = std::sync::Arc::new(MemoryStorage::new());
        backend.set_fail_saves(true);
        let (mut store, _) = HealthRecordStore::open(Box::new(backend.clone()), "u-1");

        let record = hr(1, 61);
        let record_id = record.id;
        let err = store.append(record).unwrap_err();
        assert!(matches!(err, StoreError::PersistenceUnavailable(_)));

        // Not durable, but still visible in the session view.
        assert_eq!(store.latest().unwrap().id, record_id);

        // Backend recovers; the retry persists without re-entry.
        backend.set_fail_saves(false);
        store.flush().unwrap();
        assert_eq!(backend.len(), 1);
    }
}
