use crate::FountainError;
use rdf_fragments_model::{NamedNode, NamedNodeRef};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The registry of known types.
///
/// Plan graphs only need the type hierarchy of a fountain. Seed management and persistence are
/// the business of the implementations.
pub trait Fountain: Send + Sync {
    /// Returns `ty` together with all of its direct and indirect subtypes.
    ///
    /// Returns [FountainError::UnknownType] if `ty` is not registered.
    fn subtypes(&self, ty: NamedNodeRef<'_>) -> Result<BTreeSet<NamedNode>, FountainError>;
}

impl<F: Fountain + ?Sized> Fountain for &F {
    fn subtypes(&self, ty: NamedNodeRef<'_>) -> Result<BTreeSet<NamedNode>, FountainError> {
        (**self).subtypes(ty)
    }
}

impl<F: Fountain + ?Sized> Fountain for Arc<F> {
    fn subtypes(&self, ty: NamedNodeRef<'_>) -> Result<BTreeSet<NamedNode>, FountainError> {
        (**self).subtypes(ty)
    }
}
