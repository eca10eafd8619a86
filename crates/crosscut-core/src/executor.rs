//! Cut execution state machine
//!
//! ```text
//! VALIDATE_SPEC -> APPLY_FILTER -> RESOLVE_DIMENSION -> COMPUTE_PER_PARTITION
//!               -> ANNOTATE -> EMIT -> SUCCESS
//! ```
//!
//! Any error moves the machine to `FAILED` and no partial table is returned.
//! Execution is a pure function of the catalog, the response table, the cut
//! and the reliability policy.

use crate::config::EngineConfig;
use crate::crosstab::{undimensioned_row, CrossTabulator, Dimension};
use crate::errors::Result;
use crate::filter_compiler::FilterCompiler;
use crate::mask::Mask;
use crate::metrics::{weight_vector, MetricComputer};
use crate::model::{Catalog, CutSpec, DimensionKind, ResponseTable, Table, Warning};
use crate::reliability::{annotate_table, ReliabilityPolicy, ThresholdPolicy};
use crate::rules::validation::validate_cut;
use crate::segment_resolver::SegmentResolver;
use crosscut_core_types::schema::{FIELD_BASE_N, FIELD_CUT_ID, FIELD_ROW_COUNT, FIELD_STATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    ValidateSpec,
    ApplyFilter,
    ResolveDimension,
    ComputePerPartition,
    Annotate,
    Emit,
    Success,
    Failed,
}

impl ExecutionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionState::ValidateSpec => "VALIDATE_SPEC",
            ExecutionState::ApplyFilter => "APPLY_FILTER",
            ExecutionState::ResolveDimension => "RESOLVE_DIMENSION",
            ExecutionState::ComputePerPartition => "COMPUTE_PER_PARTITION",
            ExecutionState::Annotate => "ANNOTATE",
            ExecutionState::Emit => "EMIT",
            ExecutionState::Success => "SUCCESS",
            ExecutionState::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionState::Success | ExecutionState::Failed)
    }
}

/// Executes cuts against one catalog and response table
pub struct Executor<'a> {
    catalog: &'a Catalog,
    table: &'a ResponseTable,
    policy: Box<dyn ReliabilityPolicy>,
}

impl<'a> Executor<'a> {
    /// Executor with the default 30/100 threshold policy
    pub fn new(catalog: &'a Catalog, table: &'a ResponseTable) -> Self {
        Self::with_policy(catalog, table, Box::new(ThresholdPolicy::default()))
    }

    pub fn with_policy(
        catalog: &'a Catalog,
        table: &'a ResponseTable,
        policy: Box<dyn ReliabilityPolicy>,
    ) -> Self {
        Self {
            catalog,
            table,
            policy,
        }
    }

    /// Executor whose threshold policy comes from `config`
    pub fn from_config(
        catalog: &'a Catalog,
        table: &'a ResponseTable,
        config: &EngineConfig,
    ) -> Self {
        Self::with_policy(catalog, table, Box::new(config.reliability_policy()))
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn table(&self) -> &'a ResponseTable {
        self.table
    }

    pub fn segment_resolver(&self) -> SegmentResolver<'a> {
        SegmentResolver::new(self.catalog, self.table)
    }

    /// Execute one cut
    ///
    /// # Errors
    /// Configuration errors (unresolved references, incompatible metric,
    /// predicate or dimension) and data errors (missing columns, invalid
    /// weights). Empty subsets are not errors; they yield a degenerate table
    /// with an explicit warning.
    pub fn execute(&self, cut: &CutSpec) -> Result<Table> {
        let mut state = ExecutionState::ValidateSpec;
        match self.run(cut, &mut state) {
            Ok(table) => {
                transition(cut, &mut state, ExecutionState::Success);
                Ok(table)
            }
            Err(err) => {
                tracing::debug!(
                    { FIELD_CUT_ID } = %cut.cut_id,
                    { FIELD_STATE } = state.as_str(),
                    error = %err,
                    "execution failed"
                );
                transition(cut, &mut state, ExecutionState::Failed);
                Err(err)
            }
        }
    }

    fn run(&self, cut: &CutSpec, state: &mut ExecutionState) -> Result<Table> {
        tracing::debug!(
            { FIELD_CUT_ID } = %cut.cut_id,
            { FIELD_STATE } = state.as_str(),
            "execution state"
        );

        validate_cut(cut, self.catalog)?;
        let question = self.catalog.question(&cut.metric.question_id)?;
        let column = self.table.question_column(question)?;
        let dimension = match cut.primary_dimension() {
            None => None,
            Some(spec) => Some(match spec.kind {
                DimensionKind::Question => {
                    let dim_question = self.catalog.question(&spec.id)?;
                    self.table.question_column(dim_question)?;
                    Dimension::Question(dim_question)
                }
                DimensionKind::Segment => Dimension::Segment(self.catalog.segment(&spec.id)?),
            }),
        };
        let weight_column = cut
            .weight_column
            .as_deref()
            .map(|name| self.table.named_column(name).map(|col| (name, col)))
            .transpose()?;

        transition(cut, state, ExecutionState::ApplyFilter);
        let resolver = self.segment_resolver();
        let filtered = match &cut.filter {
            Some(filter) => FilterCompiler::new(self.catalog, self.table).compile(filter)?,
            None => Mask::all(self.table.row_count()),
        };
        let weights = weight_column
            .map(|(name, col)| weight_vector(name, col, &filtered))
            .transpose()?;

        transition(cut, state, ExecutionState::ResolveDimension);
        let crosstab = CrossTabulator::new(self.table, &resolver);
        let partitions = dimension
            .map(|d| crosstab.partitions(d, &filtered))
            .transpose()?;

        transition(cut, state, ExecutionState::ComputePerPartition);
        let mut computer = MetricComputer::new(question, column);
        if let Some(weights) = weights.as_deref() {
            computer = computer.with_weights(weights);
        }
        let overall = computer.compute(cut.metric.metric_type, &filtered)?;
        let base_n = overall.base_n;
        let weighted_base = overall.weighted_base;
        let rows = match partitions {
            Some(partitions) => {
                crosstab.compute_partitions(&computer, cut.metric.metric_type, partitions)?
            }
            None => vec![undimensioned_row(overall)],
        };

        transition(cut, state, ExecutionState::Annotate);
        let mut warnings = Vec::new();
        if filtered.count() == 0 {
            warnings.push(Warning::no_matching_respondents());
        } else if base_n == 0 {
            warnings.push(Warning::no_valid_responses(&question.question_id));
        }
        let mut table = Table {
            cut_id: cut.cut_id.clone(),
            metric_type: cut.metric.metric_type,
            question_id: question.question_id.clone(),
            dimension: cut.primary_dimension().cloned(),
            rows,
            base_n,
            weighted_base,
            warnings,
        };
        annotate_table(&mut table, self.policy.as_ref());
        if cut.dimensions.len() > 1 {
            let ignored: Vec<&str> = cut.dimensions[1..].iter().map(|d| d.id.as_str()).collect();
            table.warnings.push(Warning::ignored_dimensions(&ignored));
        }
        for name in cut.metric.params.keys() {
            table.warnings.push(Warning::ignored_parameter(name));
        }

        transition(cut, state, ExecutionState::Emit);
        tracing::debug!(
            { FIELD_CUT_ID } = %cut.cut_id,
            { FIELD_ROW_COUNT } = table.rows.len(),
            { FIELD_BASE_N } = table.base_n,
            warnings = table.warnings.len(),
            "emitting table"
        );
        Ok(table)
    }
}

fn transition(cut: &CutSpec, state: &mut ExecutionState, next: ExecutionState) {
    tracing::debug!(
        { FIELD_CUT_ID } = %cut.cut_id,
        from = state.as_str(),
        { FIELD_STATE } = next.as_str(),
        "execution state"
    );
    *state = next;
}
