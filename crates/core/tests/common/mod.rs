/// DSL macros for building test relations.
///
/// Attributes are bare identifiers and become `&'static str` values.
///
/// # Syntax
///
/// ```ignore
/// attrs!(A B C)                       // BTreeSet {"A", "B", "C"}
/// fd!(A B -> C)                       // FunctionalDependency AB -> C
/// problem! {
///     [A, B, C];
///     A -> B;
///     B -> C
/// }
/// ```
///
/// Build an attribute set.
#[macro_export]
macro_rules! attrs {
    ($($attr:ident)*) => {
        [$(stringify!($attr)),*]
            .into_iter()
            .collect::<std::collections::BTreeSet<&'static str>>()
    };
}

/// Build a functional dependency.
#[macro_export]
macro_rules! fd {
    ($($lhs:ident)+ -> $($rhs:ident)+) => {
        normkit_core::FunctionalDependency::<&'static str>::new(
            $crate::attrs!($($lhs)+),
            $crate::attrs!($($rhs)+),
        )
        .expect("both sides are non-empty")
    };
}

/// Build a problem: the schema in brackets, then `;`-separated dependencies.
#[macro_export]
macro_rules! problem {
    ([$($attr:ident),* $(,)?] $(; $($lhs:ident)+ -> $($rhs:ident)+)*) => {
        normkit_core::Problem::<&'static str>::new(
            $crate::attrs!($($attr)*),
            vec![$($crate::fd!($($lhs)+ -> $($rhs)+)),*],
        )
    };
}
