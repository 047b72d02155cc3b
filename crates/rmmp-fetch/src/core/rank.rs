use crate::data::MirrorRecord;
use crate::error::{FetchError, Result};

const SPEED_WEIGHT: f64 = 0.6;
const LATENCY_WEIGHT: f64 = 0.4;

/// Order mirrors for exhaustive iteration: throughput descending.
///
/// The sort is stable, so equally fast mirrors keep directory order.
pub fn rank(records: &[MirrorRecord]) -> Vec<MirrorRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.speed_mbs.total_cmp(&a.speed_mbs));
    ranked
}

/// Score used to recommend a single mirror.
///
/// `speed * 0.6 + ((1000 - latency) / 1000) * 0.4`
pub fn composite_score(record: &MirrorRecord) -> f64 {
    let latency = f64::from(record.latency_ms);
    record.speed_mbs * SPEED_WEIGHT + (1000.0 - latency) / 1000.0 * LATENCY_WEIGHT
}

/// The mirror with the strictly greatest [`composite_score`]; the first one
/// seen wins a tie.
///
/// # Errors
///
/// [`FetchError::EmptyCatalog`] when `records` is empty.
pub fn best(records: &[MirrorRecord]) -> Result<&MirrorRecord> {
    let mut iter = records.iter();
    let first = iter.next().ok_or(FetchError::EmptyCatalog)?;

    let (winner, _) = iter.fold((first, composite_score(first)), |(best, best_score), record| {
        let score = composite_score(record);
        if score > best_score {
            (record, score)
        } else {
            (best, best_score)
        }
    });

    Ok(winner)
}
