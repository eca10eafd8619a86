//! Named segment resolution

use crate::errors::Result;
use crate::filter_compiler::FilterCompiler;
use crate::mask::Mask;
use crate::model::{Catalog, ResponseTable, SegmentSpec};
use crosscut_core_types::schema::FIELD_SEGMENT_ID;
use std::collections::BTreeMap;

/// Prefix of the complement level of a segment dimension
pub const NOT_SEGMENT_PREFIX: &str = "Not_";

/// One side of a segment partition
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLevel {
    pub label: String,
    pub mask: Mask,
}

pub struct SegmentResolver<'a> {
    catalog: &'a Catalog,
    compiler: FilterCompiler<'a>,
}

impl<'a> SegmentResolver<'a> {
    pub fn new(catalog: &'a Catalog, table: &'a ResponseTable) -> Self {
        Self {
            catalog,
            compiler: FilterCompiler::new(catalog, table),
        }
    }

    /// Membership mask of a segment
    ///
    /// # Errors
    /// Any error from compiling the segment definition.
    pub fn resolve(&self, segment: &SegmentSpec) -> Result<Mask> {
        self.compiler.compile_segment(segment)
    }

    /// Membership mask of a segment looked up by id
    ///
    /// # Errors
    /// `UnknownSegment`, or any error from compiling the definition.
    pub fn resolve_id(&self, segment_id: &str) -> Result<Mask> {
        self.resolve(self.catalog.segment(segment_id)?)
    }

    /// Split `within` into the segment level and its complement, in that order
    ///
    /// `intended_partition` is advisory and does not affect the split.
    ///
    /// # Errors
    /// Any error from resolving the segment.
    pub fn partition(&self, segment: &SegmentSpec, within: &Mask) -> Result<[SegmentLevel; 2]> {
        let members = self.resolve(segment)?;
        let inside = within & &members;
        let outside = within & &(!&members);
        Ok([
            SegmentLevel {
                label: segment.segment_id.clone(),
                mask: inside,
            },
            SegmentLevel {
                label: format!("{}{}", NOT_SEGMENT_PREFIX, segment.segment_id),
                mask: outside,
            },
        ])
    }

    /// Respondent count of every catalog segment, keyed by id
    ///
    /// # Errors
    /// The first segment that fails to resolve.
    pub fn materialize(&self) -> Result<BTreeMap<String, usize>> {
        let mut bases = BTreeMap::new();
        for (segment_id, segment) in &self.catalog.segments {
            let count = self.resolve(segment)?.count();
            tracing::debug!({ FIELD_SEGMENT_ID } = %segment_id, count, "materialized segment");
            bases.insert(segment_id.clone(), count);
        }
        Ok(bases)
    }
}
