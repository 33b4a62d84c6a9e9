//! The equality member template.

use crate::writer::SourceWriter;

/// First line of every generated unit.
pub const GENERATED_HEADER: &str = "// <auto-generated/>";

/// `GetHashCode` result for a type without instance members.
pub const EMPTY_HASH_CODE: i32 = 0;

/// Largest member count `HashCode.Combine` has an overload for.
pub const HASH_COMBINE_MAX_ARITY: usize = 8;

/// Renders the equality members of `type_name` in `namespace`.
///
/// `members` are the type's instance data members in declaration order. The
/// typed `Equals` compares them pairwise in that order and `GetHashCode`
/// folds them in that order. An empty `namespace` places the type in the
/// global namespace. Identifiers are emitted verbatim.
pub fn synthesize<S: AsRef<str>>(namespace: &str, type_name: &str, members: &[S]) -> String {
    let members: Vec<&str> = members.iter().map(AsRef::as_ref).collect();
    let mut w = SourceWriter::new();

    w.line(GENERATED_HEADER);
    w.line("#nullable disable");
    w.blank();
    w.line("using System;");
    w.blank();

    let namespaced = !namespace.is_empty();
    if namespaced {
        w.line(&format!("namespace {namespace}"));
        w.open();
    }

    w.line(&format!("partial class {type_name} : IEquatable<{type_name}>"));
    w.open();
    typed_equals(&mut w, type_name, &members);
    w.blank();
    untyped_equals(&mut w, type_name);
    w.blank();
    hash_code(&mut w, &members);
    w.blank();
    operators(&mut w, type_name);
    w.close();

    if namespaced {
        w.close();
    }
    w.finish()
}

fn typed_equals(w: &mut SourceWriter, type_name: &str, members: &[&str]) {
    w.line(&format!("public bool Equals({type_name} other)"));
    w.open();
    w.line("if (ReferenceEquals(null, other)) return false;");
    w.line("if (ReferenceEquals(this, other)) return true;");
    if members.is_empty() {
        w.line("return true;");
    } else {
        let comparisons: Vec<String> = members
            .iter()
            .map(|m| format!("Equals({m}, other.{m})"))
            .collect();
        w.line(&format!("return {};", comparisons.join(" && ")));
    }
    w.close();
}

fn untyped_equals(w: &mut SourceWriter, type_name: &str) {
    w.line("public override bool Equals(object obj)");
    w.open();
    w.line(&format!("return Equals(obj as {type_name});"));
    w.close();
}

fn hash_code(w: &mut SourceWriter, members: &[&str]) {
    w.line("public override int GetHashCode()");
    w.open();
    match members.len() {
        0 => w.line(&format!("return {EMPTY_HASH_CODE};")),
        n if n <= HASH_COMBINE_MAX_ARITY => {
            w.line(&format!("return HashCode.Combine({});", members.join(", ")))
        }
        _ => {
            w.line("var hash = new HashCode();");
            for m in members {
                w.line(&format!("hash.Add({m});"));
            }
            w.line("return hash.ToHashCode();");
        }
    }
    w.close();
}

fn operators(w: &mut SourceWriter, type_name: &str) {
    w.line(&format!(
        "public static bool operator ==({type_name} left, {type_name} right)"
    ));
    w.open();
    w.line("return Equals(left, right);");
    w.close();
    w.blank();
    w.line(&format!(
        "public static bool operator !=({type_name} left, {type_name} right)"
    ));
    w.open();
    w.line("return !Equals(left, right);");
    w.close();
}
