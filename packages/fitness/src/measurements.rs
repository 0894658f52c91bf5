//! Body measurement summaries and the chart series behind the graph screen.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{BodyMeasurement, MeasurementType};

/// Most recent measurement of each type.
pub fn latest_by_type(measurements: &[BodyMeasurement]) -> BTreeMap<MeasurementType, &BodyMeasurement> {
    let mut latest: BTreeMap<MeasurementType, &BodyMeasurement> = BTreeMap::new();
    for m in measurements {
        latest
            .entry(m.measurement_type)
            .and_modify(|cur| {
                if m.created_at > cur.created_at {
                    *cur = m;
                }
            })
            .or_insert(m);
    }
    latest
}

/// Latest value of one type, if any.
pub fn latest_value(measurements: &[BodyMeasurement], kind: MeasurementType) -> Option<f64> {
    measurements
        .iter()
        .filter(|m| m.measurement_type == kind)
        .max_by_key(|m| m.created_at)
        .map(|m| m.value)
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphPoint {
    pub at: DateTime<Utc>,
    pub value: f64,
    /// Vertical position in `0.0..=1.0`, 0 at the minimum.
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphSeries {
    pub kind: MeasurementType,
    pub points: Vec<GraphPoint>,
    pub min: f64,
    pub max: f64,
    /// Last value minus first value.
    pub change: f64,
}

impl GraphSeries {
    /// Chart data for one measurement type, oldest point first. `None` when
    /// there are no measurements of that type.
    pub fn build(measurements: &[BodyMeasurement], kind: MeasurementType) -> Option<Self> {
        let mut selected: Vec<&BodyMeasurement> = measurements
            .iter()
            .filter(|m| m.measurement_type == kind && m.value.is_finite())
            .collect();
        if selected.is_empty() {
            return None;
        }
        selected.sort_by_key(|m| m.created_at);

        let min = selected.iter().map(|m| m.value).fold(f64::INFINITY, f64::min);
        let max = selected.iter().map(|m| m.value).fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        let points = selected
            .iter()
            .map(|m| GraphPoint {
                at: m.created_at,
                value: m.value,
                y: if span > 0.0 { (m.value - min) / span } else { 0.5 },
            })
            .collect::<Vec<_>>();
        let change = points[points.len() - 1].value - points[0].value;

        Some(Self {
            kind,
            points,
            min,
            max,
            change,
        })
    }

    /// Horizontal position of point `i` in `0.0..=1.0`.
    pub fn x(&self, i: usize) -> f64 {
        if self.points.len() < 2 {
            0.5
        } else {
            i as f64 / (self.points.len() - 1) as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn m(kind: MeasurementType, value: f64, day: u32) -> BodyMeasurement {
        BodyMeasurement {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            measurement_type: kind,
            value,
            unit: kind.unit().to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 2, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_latest_by_type() {
        let rows = vec![
            m(MeasurementType::Weight, 82.0, 3),
            m(MeasurementType::Weight, 81.0, 5),
            m(MeasurementType::Waist, 90.0, 1),
            m(MeasurementType::Weight, 83.0, 1),
        ];
        let latest = latest_by_type(&rows);
        assert_eq!(latest[&MeasurementType::Weight].value, 81.0);
        assert_eq!(latest[&MeasurementType::Waist].value, 90.0);
        assert!(!latest.contains_key(&MeasurementType::Hips));
        assert_eq!(latest_value(&rows, MeasurementType::Weight), Some(81.0));
        assert_eq!(latest_value(&rows, MeasurementType::Arm), None);
    }

    #[test]
    fn test_series_is_sorted_and_normalized() {
        let rows = vec![
            m(MeasurementType::Weight, 80.0, 10),
            m(MeasurementType::Weight, 84.0, 1),
            m(MeasurementType::Weight, 82.0, 5),
            m(MeasurementType::Waist, 95.0, 2),
        ];
        let series = GraphSeries::build(&rows, MeasurementType::Weight).unwrap();
        let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![84.0, 82.0, 80.0]);
        assert_eq!(series.min, 80.0);
        assert_eq!(series.max, 84.0);
        assert_eq!(series.change, -4.0);
        assert_eq!(series.points[0].y, 1.0);
        assert_eq!(series.points[1].y, 0.5);
        assert_eq!(series.points[2].y, 0.0);
        assert_eq!(series.x(0), 0.0);
        assert_eq!(series.x(2), 1.0);
    }

    #[test]
    fn test_flat_and_empty_series() {
        let rows = vec![m(MeasurementType::Hips, 100.0, 1)];
        let series = GraphSeries::build(&rows, MeasurementType::Hips).unwrap();
        assert_eq!(series.points[0].y, 0.5);
        assert_eq!(series.x(0), 0.5);
        assert_eq!(series.change, 0.0);
        assert!(GraphSeries::build(&rows, MeasurementType::Chest).is_none());
    }
}
