//! Selecting the members that take part in equality.

use eqsynth_model::ResolvedType;

/// Returns the names of `ty`'s instance data members in declaration order.
///
/// Only non-static fields and properties qualify. Static members are shared
/// by every instance and never take part in instance equality; methods,
/// constructors, events and nested types carry no instance data.
pub fn extract_members(ty: &ResolvedType) -> Vec<String> {
    ty.members
        .iter()
        .filter(|m| m.kind.carries_data() && !m.is_static)
        .map(|m| m.name.clone())
        .collect()
}
