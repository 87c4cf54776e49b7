use crate::model::{AxisLabel, YearMonth};

/// Labels every `interval_months` from `earliest` up to and including
/// `latest`. `span_months` is the divisor used for bar fractions, so labels
/// and bars share one coordinate system.
pub fn axis_labels(
    earliest: YearMonth,
    latest: YearMonth,
    span_months: u32,
    interval_months: u32,
) -> Vec<AxisLabel> {
    let total = earliest.months_until(latest);
    if total < 0 || interval_months == 0 {
        return Vec::new();
    }

    let divisor = f64::from(span_months.max(1));
    let step = i64::from(interval_months);
    let mut labels = Vec::with_capacity((total / step + 1) as usize);
    let mut offset = 0;
    while offset <= total {
        labels.push(AxisLabel {
            fraction: (offset as f64 / divisor).clamp(0.0, 1.0),
            label: earliest.add_months(offset).short_label(),
        });
        offset += step;
    }
    labels
}
