//! Chat-log import session: extraction, roster resolution and operator
//! selection, up to the mutation plan.

use crate::core::reconcile::{ReconcilePlan, Reconciler, default_selection};
use crate::core::window::AttendanceWindow;
use crate::errors::{AppError, AppResult};
use crate::extract::response::parse_candidates;
use crate::extract::{ExtractionRequest, Extractor};
use crate::models::candidate::{ParsedCandidate, RejectedEntry};
use crate::models::record::AttendanceRecord;
use crate::models::sewadar::Sewadar;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RosterResolution {
    /// Candidates whose matched id was not on the roster (id cleared).
    pub cleared: Vec<usize>,
    /// Unmatched candidates matched locally by exact name.
    pub matched_by_name: Vec<usize>,
}

/// Check every matched id against the roster and match unmatched names that
/// equal exactly one roster name.
pub fn resolve_against_roster(
    candidates: &mut [ParsedCandidate],
    roster: &[Sewadar],
) -> RosterResolution {
    let ids: HashSet<&str> = roster.iter().map(|s| s.id.as_str()).collect();

    let mut by_name: HashMap<String, Vec<&str>> = HashMap::new();
    for s in roster {
        by_name
            .entry(Sewadar::name_key(&s.name))
            .or_default()
            .push(s.id.as_str());
    }

    let mut res = RosterResolution::default();

    for (i, c) in candidates.iter_mut().enumerate() {
        if let Some(id) = c.matched_sewadar_id.as_deref()
            && !ids.contains(id)
        {
            c.matched_sewadar_id = None;
            res.cleared.push(i);
        }

        if c.matched_sewadar_id.is_none()
            && let Some(found) = by_name.get(&Sewadar::name_key(&c.raw_name))
            && found.len() == 1
        {
            c.matched_sewadar_id = Some(found[0].to_string());
            res.matched_by_name.push(i);
        }
    }

    res
}

/// Parse an operator index list such as `1,3,5-7` (1-based) into 0-based indices.
pub fn parse_index_list(input: &str) -> AppResult<Vec<usize>> {
    let mut out = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let bad = || AppError::InvalidCandidate(format!("invalid index {part:?}"));

        let (from, to) = match part.split_once('-') {
            Some((a, b)) => (
                a.trim().parse::<usize>().map_err(|_| bad())?,
                b.trim().parse::<usize>().map_err(|_| bad())?,
            ),
            None => {
                let n = part.parse::<usize>().map_err(|_| bad())?;
                (n, n)
            }
        };

        if from == 0 || to < from {
            return Err(bad());
        }
        out.extend((from..=to).map(|n| n - 1));
    }

    Ok(out)
}

#[derive(Debug)]
pub struct ImportSession {
    pub window: AttendanceWindow,
    pub truncated: bool,
    pub candidates: Vec<ParsedCandidate>,
    pub rejected: Vec<RejectedEntry>,
    pub resolution: RosterResolution,
    selected: BTreeSet<usize>,
}

impl ImportSession {
    /// Run the extraction for `window` and validate the answer.
    pub fn prepare(
        extractor: &dyn Extractor,
        transcript: &str,
        roster: &[Sewadar],
        window: AttendanceWindow,
        team_name: &str,
        max_chars: usize,
    ) -> AppResult<Self> {
        let request = ExtractionRequest::new(transcript, roster, &window, team_name, max_chars);
        let raw = extractor.extract(&request)?;
        let parsed = parse_candidates(&raw)?;

        let mut session = Self::from_candidates(parsed.candidates, roster, window);
        session.rejected = parsed.rejected;
        session.truncated = request.truncated;
        Ok(session)
    }

    pub fn from_candidates(
        mut candidates: Vec<ParsedCandidate>,
        roster: &[Sewadar],
        window: AttendanceWindow,
    ) -> Self {
        let resolution = resolve_against_roster(&mut candidates, roster);
        let selected = default_selection(&candidates);

        Self {
            window,
            truncated: false,
            candidates,
            rejected: Vec::new(),
            resolution,
            selected,
        }
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    fn check_index(&self, index: usize) -> AppResult<&ParsedCandidate> {
        self.candidates.get(index).ok_or_else(|| {
            AppError::InvalidCandidate(format!(
                "#{} is out of range (1-{})",
                index + 1,
                self.candidates.len()
            ))
        })
    }

    /// Restrict the selection to `indices`. Unmatched candidates cannot be selected.
    pub fn select_only(&mut self, indices: &[usize]) -> AppResult<()> {
        let mut next = BTreeSet::new();
        for &i in indices {
            let c = self.check_index(i)?;
            if !c.is_matched() {
                return Err(AppError::InvalidCandidate(format!(
                    "#{} ({}) is not matched to any sewadar",
                    i + 1,
                    c.raw_name
                )));
            }
            next.insert(i);
        }
        self.selected = next;
        Ok(())
    }

    pub fn exclude(&mut self, indices: &[usize]) -> AppResult<()> {
        for &i in indices {
            self.check_index(i)?;
            self.selected.remove(&i);
        }
        Ok(())
    }

    pub fn plan(&self, records: &[AttendanceRecord], default_counter: &str) -> ReconcilePlan {
        Reconciler::new(default_counter).plan(
            &self.candidates,
            &self.selected,
            records,
            self.window.date,
        )
    }
}
