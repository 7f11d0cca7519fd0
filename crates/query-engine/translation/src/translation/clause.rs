//! Entry points that read a clause and compile it for a target.
//!
//! A missing or blank clause means "no constraint". Compiling is stateless:
//! the same clause always yields equal output, and the parsers can be shared
//! freely between threads.

use bson::Document;
use query_engine_ql::ql::ast::{OrderBy, Predicate, Projection};
use query_engine_ql::ql::{grammar, helpers};

use super::error::Error;
use super::in_process::filtering::Filter;
use super::in_process::projection::Projector;
use super::target::{ClauseKind, Target};
use super::{document, in_process};

/// A compiled `select` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledSelect {
    Document(Document),
    InProcess(Projector),
}

/// A compiled `where` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledWhere {
    Document(Document),
    InProcess(Filter),
}

/// A compiled `order by` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledOrderBy {
    Document(Document),
}

fn non_blank(clause: Option<&str>) -> Option<&str> {
    clause.filter(|text| !text.trim().is_empty())
}

fn resolve_target(
    clause: ClauseKind,
    name: &str,
    supported: &[Target],
) -> Result<Target, Error> {
    name.parse::<Target>()
        .ok()
        .filter(|target| supported.contains(target))
        .ok_or_else(|| Error::UnsupportedTarget {
            clause,
            requested: name.to_string(),
            supported: supported.to_vec(),
        })
}

// Select //

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectClauseParser;

impl SelectClauseParser {
    pub const SUPPORTED: [Target; 2] = [Target::DocumentStore, Target::InProcess];

    pub fn compile(&self, target: Target, clause: Option<&str>) -> Result<CompiledSelect, Error> {
        match target {
            Target::DocumentStore => self.document(clause).map(CompiledSelect::Document),
            Target::InProcess => self.projector(clause).map(CompiledSelect::InProcess),
        }
    }

    /// Compile for a target given by name.
    pub fn compile_for(&self, target: &str, clause: Option<&str>) -> Result<CompiledSelect, Error> {
        let target = resolve_target(ClauseKind::Select, target, &Self::SUPPORTED)?;
        self.compile(target, clause)
    }

    pub fn projections(&self, clause: Option<&str>) -> Result<Vec<Projection>, Error> {
        match non_blank(clause) {
            None => Ok(helpers::empty_select()),
            Some(text) => Ok(grammar::select_list(text)?),
        }
    }

    pub fn document(&self, clause: Option<&str>) -> Result<Document, Error> {
        let projections = self.projections(clause)?;
        Ok(document::projection::translate_projections(&projections))
    }

    pub fn projector(&self, clause: Option<&str>) -> Result<Projector, Error> {
        let projections = self.projections(clause)?;
        Ok(in_process::projection::translate_projections(&projections))
    }
}

// Where //

#[derive(Debug, Clone, Copy, Default)]
pub struct WhereClauseParser;

impl WhereClauseParser {
    pub const SUPPORTED: [Target; 2] = [Target::DocumentStore, Target::InProcess];

    pub fn compile(&self, target: Target, clause: Option<&str>) -> Result<CompiledWhere, Error> {
        match target {
            Target::DocumentStore => self.document(clause).map(CompiledWhere::Document),
            Target::InProcess => self.filter(clause).map(CompiledWhere::InProcess),
        }
    }

    /// Compile for a target given by name.
    pub fn compile_for(&self, target: &str, clause: Option<&str>) -> Result<CompiledWhere, Error> {
        let target = resolve_target(ClauseKind::Where, target, &Self::SUPPORTED)?;
        self.compile(target, clause)
    }

    pub fn predicates(&self, clause: Option<&str>) -> Result<Vec<Predicate>, Error> {
        match non_blank(clause) {
            None => Ok(helpers::empty_where()),
            Some(text) => Ok(grammar::search_condition(text)?),
        }
    }

    pub fn document(&self, clause: Option<&str>) -> Result<Document, Error> {
        let predicates = self.predicates(clause)?;
        document::filtering::translate_predicates(&predicates)
    }

    pub fn filter(&self, clause: Option<&str>) -> Result<Filter, Error> {
        let predicates = self.predicates(clause)?;
        in_process::filtering::translate_predicates(&predicates)
    }
}

// Order by //

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderByClauseParser;

impl OrderByClauseParser {
    pub const SUPPORTED: [Target; 1] = [Target::DocumentStore];

    pub fn compile(&self, target: Target, clause: Option<&str>) -> Result<CompiledOrderBy, Error> {
        match target {
            Target::DocumentStore => self.document(clause).map(CompiledOrderBy::Document),
            Target::InProcess => Err(Error::UnsupportedTarget {
                clause: ClauseKind::OrderBy,
                requested: target.to_string(),
                supported: Self::SUPPORTED.to_vec(),
            }),
        }
    }

    /// Compile for a target given by name.
    pub fn compile_for(&self, target: &str, clause: Option<&str>) -> Result<CompiledOrderBy, Error> {
        let target = resolve_target(ClauseKind::OrderBy, target, &Self::SUPPORTED)?;
        self.compile(target, clause)
    }

    pub fn order_by(&self, clause: Option<&str>) -> Result<Vec<OrderBy>, Error> {
        match non_blank(clause) {
            None => Ok(helpers::empty_order_by()),
            Some(text) => Ok(grammar::sort_specifier_list(text)?),
        }
    }

    pub fn document(&self, clause: Option<&str>) -> Result<Document, Error> {
        let order_by = self.order_by(clause)?;
        Ok(document::sorting::translate_order_by(&order_by))
    }
}
