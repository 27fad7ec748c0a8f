//! Declaration filter.

use weft_schema::{Declaration, DeclarationId, DeclarationKind, SemanticQuery};

/// Returns true if a declaration is open for extension by generated members.
#[must_use]
pub fn is_candidate(declaration: &Declaration) -> bool {
    declaration.is_partial
        && matches!(
            declaration.kind,
            DeclarationKind::Class | DeclarationKind::Record
        )
}

/// Selects candidate declarations in snapshot order.
pub fn select_candidates<Q: SemanticQuery + ?Sized>(query: &Q) -> Vec<DeclarationId> {
    let candidates: Vec<DeclarationId> = query
        .declarations()
        .iter()
        .enumerate()
        .filter(|(_, declaration)| is_candidate(declaration))
        .map(|(index, _)| DeclarationId(index))
        .collect();

    tracing::debug!(
        total = query.declarations().len(),
        candidates = candidates.len(),
        "selected candidate declarations"
    );
    candidates
}
