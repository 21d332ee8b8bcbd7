//! Turn a reviewed batch of extracted candidates into store mutations.
//!
//! Per volunteer the batch carries at most one IN (first wins) and one OUT
//! (last wins). An IN produces a single insert, carrying the OUT time when
//! both are present. A lone OUT closes the volunteer's open record for the
//! active date, or is dropped when there is nothing to close.

use crate::core::normalize::normalize_time;
use crate::models::candidate::ParsedCandidate;
use crate::models::event_type::EventType;
use crate::models::record::AttendanceRecord;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// A single write against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create {
        sewadar_id: String,
        counter: String,
        start_time: String,
        end_time: Option<String>,
    },
    SetEndTime {
        record_id: String,
        sewadar_id: String,
        end_time: String,
    },
}

impl Mutation {
    pub fn sewadar_id(&self) -> &str {
        match self {
            Mutation::Create { sewadar_id, .. } | Mutation::SetEndTime { sewadar_id, .. } => {
                sewadar_id
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Selected but never matched to a roster entry.
    Unmatched,
    /// Lone OUT with no open record to close on the active date.
    NoOpenRecord,
    /// Lone IN for a volunteer who is already checked in.
    AlreadyCheckedIn { record_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub candidate_index: usize,
    pub sewadar_id: Option<String>,
    pub raw_name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub mutations: Vec<Mutation>,
    pub skipped: Vec<Skipped>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

#[derive(Debug, Default)]
struct Group<'a> {
    ev_in: Option<(usize, &'a ParsedCandidate)>,
    ev_out: Option<(usize, &'a ParsedCandidate)>,
}

/// Indices of the candidates selected by default: every matched one.
pub fn default_selection(candidates: &[ParsedCandidate]) -> BTreeSet<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_matched())
        .map(|(i, _)| i)
        .collect()
}

pub struct Reconciler<'a> {
    default_counter: &'a str,
}

impl<'a> Reconciler<'a> {
    pub fn new(default_counter: &'a str) -> Self {
        Self { default_counter }
    }

    /// Build the mutation plan for the `selected` candidates.
    ///
    /// `records` is the current record collection; only OPEN records dated
    /// `date` are considered when resolving a lone OUT.
    pub fn plan(
        &self,
        candidates: &[ParsedCandidate],
        selected: &BTreeSet<usize>,
        records: &[AttendanceRecord],
        date: NaiveDate,
    ) -> ReconcilePlan {
        let mut plan = ReconcilePlan::default();

        // 1) group by volunteer, keeping first-appearance order
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Group> = HashMap::new();

        for &idx in selected {
            let Some(c) = candidates.get(idx) else {
                continue;
            };

            let Some(sid) = c.matched_sewadar_id.as_deref() else {
                plan.skipped.push(Skipped {
                    candidate_index: idx,
                    sewadar_id: None,
                    raw_name: c.raw_name.clone(),
                    reason: SkipReason::Unmatched,
                });
                continue;
            };

            let group = groups.entry(sid.to_string()).or_insert_with(|| {
                order.push(sid.to_string());
                Group::default()
            });

            match c.event_type {
                EventType::In => {
                    if group.ev_in.is_none() {
                        group.ev_in = Some((idx, c));
                    }
                }
                EventType::Out => group.ev_out = Some((idx, c)),
            }
        }

        // 2) synthesize one mutation per volunteer
        for sid in order {
            let Some(group) = groups.get(&sid) else {
                continue;
            };

            let open = records
                .iter()
                .find(|r| r.sewadar_id == sid && r.date == date && r.is_open());

            match (group.ev_in, group.ev_out) {
                (Some((idx, ev_in)), ev_out) => {
                    if ev_out.is_none()
                        && let Some(rec) = open
                    {
                        plan.skipped.push(Skipped {
                            candidate_index: idx,
                            sewadar_id: Some(sid.clone()),
                            raw_name: ev_in.raw_name.clone(),
                            reason: SkipReason::AlreadyCheckedIn {
                                record_id: rec.id.clone(),
                            },
                        });
                        continue;
                    }

                    plan.mutations.push(Mutation::Create {
                        sewadar_id: sid.clone(),
                        counter: self.counter_for(ev_in),
                        start_time: normalize_time(&ev_in.time),
                        end_time: ev_out.map(|(_, o)| normalize_time(&o.time)),
                    });
                }
                (None, Some((idx, ev_out))) => match open {
                    Some(rec) => plan.mutations.push(Mutation::SetEndTime {
                        record_id: rec.id.clone(),
                        sewadar_id: sid.clone(),
                        end_time: normalize_time(&ev_out.time),
                    }),
                    None => plan.skipped.push(Skipped {
                        candidate_index: idx,
                        sewadar_id: Some(sid.clone()),
                        raw_name: ev_out.raw_name.clone(),
                        reason: SkipReason::NoOpenRecord,
                    }),
                },
                (None, None) => {}
            }
        }

        plan
    }

    fn counter_for(&self, c: &ParsedCandidate) -> String {
        match c.counter.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.default_counter.to_string(),
        }
    }
}
