use crate::{Fountain, FountainError};
use oxttl::TurtleParser;
use rdf_fragments_model::vocab::{owl, rdf, rdfs};
use rdf_fragments_model::{NamedNode, NamedNodeRef, Subject, Term};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use tracing::debug;

/// A [Fountain] that keeps its type hierarchy in memory.
///
/// Types are declared explicitly or read from an RDFS/OWL vocabulary. Closures are computed on
/// demand, so the hierarchy may be extended at any time before it is shared.
#[derive(Debug, Clone, Default)]
pub struct MemoryFountain {
    types: BTreeMap<NamedNode, TypeEntry>,
}

/// The direct neighbours of a type in the hierarchy.
#[derive(Debug, Clone, Default)]
struct TypeEntry {
    sub: BTreeSet<NamedNode>,
    sup: BTreeSet<NamedNode>,
}

impl MemoryFountain {
    /// Creates an empty [MemoryFountain].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [MemoryFountain] from a Turtle vocabulary.
    pub fn from_vocabulary(reader: impl Read) -> Result<Self, FountainError> {
        let mut fountain = Self::new();
        fountain.load_vocabulary(reader)?;
        Ok(fountain)
    }

    /// Reads the classes and the `rdfs:subClassOf` hierarchy of a Turtle vocabulary.
    ///
    /// Subjects typed as `owl:Class` or `rdfs:Class` are declared as types. Every
    /// `rdfs:subClassOf` statement between two named classes becomes a subtype relation.
    pub fn load_vocabulary(&mut self, reader: impl Read) -> Result<(), FountainError> {
        let mut classes = 0;
        let mut edges = 0;
        for triple in TurtleParser::new().for_reader(reader) {
            let triple = triple?;
            let Subject::NamedNode(subject) = triple.subject else {
                continue;
            };
            let Term::NamedNode(object) = triple.object else {
                continue;
            };

            if triple.predicate.as_ref() == rdf::TYPE
                && (object.as_ref() == owl::CLASS || object.as_ref() == rdfs::CLASS)
            {
                classes += usize::from(self.add_type(subject));
            } else if triple.predicate.as_ref() == rdfs::SUB_CLASS_OF {
                self.add_subtype(subject, object);
                edges += 1;
            }
        }

        debug!(classes, edges, types = self.types.len(), "Loaded vocabulary");
        Ok(())
    }

    /// Declares `ty`. Returns `false` if it was already known.
    pub fn add_type(&mut self, ty: NamedNode) -> bool {
        if self.types.contains_key(&ty) {
            return false;
        }
        self.types.insert(ty, TypeEntry::default());
        true
    }

    /// Declares `sub` as a direct subtype of `sup`. Both types become known.
    pub fn add_subtype(&mut self, sub: NamedNode, sup: NamedNode) {
        self.types
            .entry(sup.clone())
            .or_default()
            .sub
            .insert(sub.clone());
        self.types.entry(sub).or_default().sup.insert(sup);
    }

    /// Returns whether `ty` is known.
    pub fn contains(&self, ty: NamedNodeRef<'_>) -> bool {
        self.types.contains_key(&ty.into_owned())
    }

    /// Iterates over all known types.
    pub fn types(&self) -> impl Iterator<Item = &NamedNode> {
        self.types.keys()
    }

    /// Returns `ty` together with all of its direct and indirect supertypes.
    pub fn supertypes(&self, ty: NamedNodeRef<'_>) -> Result<BTreeSet<NamedNode>, FountainError> {
        self.closure(ty, |entry| &entry.sup)
    }

    /// Walks the hierarchy from `ty` until no new type is found. Cyclic hierarchies terminate.
    fn closure(
        &self,
        ty: NamedNodeRef<'_>,
        neighbours: impl Fn(&TypeEntry) -> &BTreeSet<NamedNode>,
    ) -> Result<BTreeSet<NamedNode>, FountainError> {
        if !self.contains(ty) {
            return Err(FountainError::UnknownType(ty.into_owned()));
        }

        let mut result = BTreeSet::from([ty.into_owned()]);
        let mut pending = vec![ty.into_owned()];
        while let Some(current) = pending.pop() {
            let Some(entry) = self.types.get(&current) else {
                continue;
            };
            for next in neighbours(entry) {
                if result.insert(next.clone()) {
                    pending.push(next.clone());
                }
            }
        }
        Ok(result)
    }
}

impl Fountain for MemoryFountain {
    fn subtypes(&self, ty: NamedNodeRef<'_>) -> Result<BTreeSet<NamedNode>, FountainError> {
        self.closure(ty, |entry| &entry.sub)
    }
}
