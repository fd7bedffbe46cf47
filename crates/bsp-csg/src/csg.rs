//! Boolean operations composed from BSP tree primitives.
//!
//! Every operation clones both input trees and then runs a fixed sequence
//! of `invert`, `clip_to` and `build` steps on the copies (the classic
//! BSP formulation popularised by csg.js). Changing the order yields wrong
//! geometry, not just slower code.

use std::fmt;

use tracing::{instrument, trace};

use crate::error::{CsgError, Result};
use crate::{BspNode, CsgConfig, Polygon};

/// A boolean operation on two solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// Space inside either solid.
    Union,
    /// Space inside the first solid but not the second.
    Subtract,
    /// Space inside both solids.
    Intersect,
}

/// A single primitive step in a composed boolean operation.
///
/// `A` is the (cloned) first operand, `B` the (cloned) second operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    InvertA,
    InvertB,
    ClipAToB,
    ClipBToA,
    BuildAFromB,
}

use self::Step::*;

const UNION_STEPS: &[Step] = &[ClipAToB, ClipBToA, InvertB, ClipBToA, InvertB, BuildAFromB];

const SUBTRACT_STEPS: &[Step] = &[
    InvertA,
    ClipAToB,
    ClipBToA,
    InvertB,
    ClipBToA,
    InvertB,
    BuildAFromB,
    InvertA,
];

const INTERSECT_STEPS: &[Step] = &[
    InvertA,
    ClipBToA,
    InvertB,
    ClipAToB,
    ClipBToA,
    BuildAFromB,
    InvertA,
];

impl BooleanOp {
    /// The exact step sequence that realises this operation.
    pub fn steps(self) -> &'static [Step] {
        match self {
            BooleanOp::Union => UNION_STEPS,
            BooleanOp::Subtract => SUBTRACT_STEPS,
            BooleanOp::Intersect => INTERSECT_STEPS,
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BooleanOp::Union => "union",
            BooleanOp::Subtract => "subtract",
            BooleanOp::Intersect => "intersect",
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvertA => "a.invert()",
            InvertB => "b.invert()",
            ClipAToB => "a.clip_to(b)",
            ClipBToA => "b.clip_to(a)",
            BuildAFromB => "a.build(b.all_polygons())",
        })
    }
}

/// Runs boolean operations on BSP trees with a fixed configuration.
///
/// Inputs are never mutated, so a service can be shared across threads and
/// independent operations can run in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgService {
    config: CsgConfig,
}

impl CsgService {
    /// Creates a service using `config` for every operation.
    pub fn new(config: CsgConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[inline]
    pub fn config(&self) -> &CsgConfig {
        &self.config
    }

    /// Returns the union of `a` and `b`.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    #[instrument(level = "debug", skip_all)]
    pub fn union<S: Clone>(&self, a: &BspNode<S>, b: &BspNode<S>) -> Result<BspNode<S>> {
        self.apply(BooleanOp::Union, a, b)
    }

    /// Returns `a` with `b` removed.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    #[instrument(level = "debug", skip_all)]
    pub fn subtract<S: Clone>(&self, a: &BspNode<S>, b: &BspNode<S>) -> Result<BspNode<S>> {
        self.apply(BooleanOp::Subtract, a, b)
    }

    /// Returns the space common to `a` and `b`.
    ///
    /// ```text
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    #[instrument(level = "debug", skip_all)]
    pub fn intersect<S: Clone>(&self, a: &BspNode<S>, b: &BspNode<S>) -> Result<BspNode<S>> {
        self.apply(BooleanOp::Intersect, a, b)
    }

    /// Builds trees from two polygon lists and returns the boundary of their union.
    pub fn union_polygons<S: Clone>(
        &self,
        a: &[Polygon<S>],
        b: &[Polygon<S>],
    ) -> Result<Vec<Polygon<S>>> {
        self.apply_polygons(BooleanOp::Union, a, b)
    }

    /// Builds trees from two polygon lists and returns the boundary of `a` minus `b`.
    pub fn subtract_polygons<S: Clone>(
        &self,
        a: &[Polygon<S>],
        b: &[Polygon<S>],
    ) -> Result<Vec<Polygon<S>>> {
        self.apply_polygons(BooleanOp::Subtract, a, b)
    }

    /// Builds trees from two polygon lists and returns the boundary of their intersection.
    pub fn intersect_polygons<S: Clone>(
        &self,
        a: &[Polygon<S>],
        b: &[Polygon<S>],
    ) -> Result<Vec<Polygon<S>>> {
        self.apply_polygons(BooleanOp::Intersect, a, b)
    }

    fn apply_polygons<S: Clone>(
        &self,
        op: BooleanOp,
        a: &[Polygon<S>],
        b: &[Polygon<S>],
    ) -> Result<Vec<Polygon<S>>> {
        let a = BspNode::from_polygons(a.to_vec())?;
        let b = BspNode::from_polygons(b.to_vec())?;
        Ok(self.apply(op, &a, &b)?.all_polygons())
    }

    /// Runs the step sequence of `op` on private copies of `a` and `b`.
    ///
    /// The first failing step aborts the operation; the error names the
    /// operation, the step and its 1-based position in the sequence.
    pub fn apply<S: Clone>(
        &self,
        op: BooleanOp,
        a: &BspNode<S>,
        b: &BspNode<S>,
    ) -> Result<BspNode<S>> {
        let mut a = a.clone();
        let mut b = b.clone();

        for (index, &step) in op.steps().iter().enumerate() {
            trace!(%op, %step, index = index + 1, "running step");
            self.run_step(step, &mut a, &mut b)
                .map_err(|source| CsgError::Step {
                    op,
                    step,
                    index: index + 1,
                    source: Box::new(source),
                })?;
        }

        Ok(a)
    }

    fn run_step<S: Clone>(&self, step: Step, a: &mut BspNode<S>, b: &mut BspNode<S>) -> Result<()> {
        match step {
            InvertA => a.invert(),
            InvertB => b.invert(),
            ClipAToB => a.clip_to(b, &self.config)?,
            ClipBToA => b.clip_to(a, &self.config)?,
            BuildAFromB => a.build(b.all_polygons())?,
        }
        Ok(())
    }
}
