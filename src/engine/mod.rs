mod influence;
mod rulestring;

use self::influence::Influence;
pub use self::rulestring::parse as parse_rulestring;
use crate::{CellState, Grid, Result, RuleTableError, Variant, cell};
use log::{debug, trace, warn};

/// Index of each [`CellState`] (by [`CellState::index`]) in the variant list
type StateLookup = [Option<usize>; CellState::ALL.len()];

/// Drives generations over a [`Grid`] from a table of [`Variant`]s
#[derive(Debug, Clone)]
pub struct RuleEngine {
    variants: Vec<Variant>,
    lookup: StateLookup,

    // scratch space, only meaningful during a single `step`
    influence: Influence,
    next: Vec<CellState>,
}

impl RuleEngine {
    pub fn new(variants: Vec<Variant>) -> Result<Self> {
        let lookup = validate(&variants)?;
        Ok(Self {
            variants,
            lookup,
            influence: Influence::default(),
            next: Vec::new(),
        })
    }

    /// Replaces the variant list used to resolve transitions
    ///
    /// An invalid list is rejected and the previous configuration is kept.
    pub fn configure(&mut self, variants: Vec<Variant>) -> Result<()> {
        self.lookup = validate(&variants)?;
        self.variants = variants;
        debug!(
            "configured {} variants ({})",
            self.variants.len(),
            self.rulestring().as_deref().unwrap_or("custom table")
        );
        Ok(())
    }

    #[inline]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// The configured variant for `state`, if any
    pub fn variant(&self, state: CellState) -> Option<&Variant> {
        self.lookup[state.index()].map(|idx| &self.variants[idx])
    }

    /// The configured table in `B.../S...` notation, if it can be written as one
    pub fn rulestring(&self) -> Option<String> {
        rulestring::format(&self.variants)
    }

    /// Advances `grid` by exactly one generation
    ///
    /// Either every cell moves to its next state or, on error, none do.
    pub fn step(&mut self, grid: &mut Grid) -> Result<()> {
        if let Err(err) = self.compute(grid) {
            warn!("generation rejected: {err}");
            return Err(err);
        }
        grid.commit(&mut self.next);
        trace!("committed generation, {} alive", grid.count(CellState::Alive));
        Ok(())
    }

    /// Fills `self.next` with the generation following `grid`
    fn compute(&mut self, grid: &Grid) -> Result<()> {
        let Self {
            variants,
            lookup,
            influence,
            next,
        } = self;
        let (variants, lookup) = (&*variants, &*lookup);

        // every sum is complete before any next state is resolved
        influence.accumulate(grid, |state| {
            Ok(variant_of(variants, lookup, state)?.influence)
        })?;

        next.clear();
        next.reserve(grid.len());
        for (idx, (&state, &sum)) in grid.cells().iter().zip(influence.sums()).enumerate() {
            let target = variant_of(variants, lookup, state)?
                .transitions
                .get(sum as usize)
                .copied()
                .ok_or_else(|| {
                    let pos = grid.pos(idx);
                    RuleTableError::SumOutOfRange {
                        x: pos.x,
                        y: pos.y,
                        sum,
                    }
                })?;
            // targets are checked against the list length by `validate`
            next.push(variants[target].state);
        }
        Ok(())
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            variants: cell::conway(),
            lookup: [Some(0), Some(1)],
            influence: Influence::default(),
            next: Vec::new(),
        }
    }
}

fn variant_of<'v>(
    variants: &'v [Variant],
    lookup: &StateLookup,
    state: CellState,
) -> Result<&'v Variant> {
    let idx = lookup[state.index()].ok_or(RuleTableError::UnknownState(state))?;
    Ok(&variants[idx])
}

fn validate(variants: &[Variant]) -> Result<StateLookup> {
    if variants.is_empty() {
        return Err(RuleTableError::Empty.into());
    }

    let mut lookup: StateLookup = [None; CellState::ALL.len()];
    for (idx, variant) in variants.iter().enumerate() {
        let slot = &mut lookup[variant.state.index()];
        if slot.is_some() {
            return Err(RuleTableError::DuplicateState(variant.state).into());
        }
        *slot = Some(idx);

        if let Some(&target) = variant.transitions.iter().find(|&&t| t >= variants.len()) {
            return Err(RuleTableError::TargetOutOfRange {
                state: variant.state,
                target,
                len: variants.len(),
            }
            .into());
        }
    }
    Ok(lookup)
}
