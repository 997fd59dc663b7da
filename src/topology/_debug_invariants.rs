/// Runs the full invariant validator on a graph after a mutation.
///
/// Fires in debug builds and whenever the `strict-invariants` feature is
/// enabled; compiles to a no-op otherwise.
#[cfg(any(debug_assertions, feature = "strict-invariants"))]
macro_rules! debug_invariants {
    ($s:expr) => {
        $crate::debug_invariants::DebugInvariants::debug_assert_invariants(&*$s)
    };
}

#[cfg(not(any(debug_assertions, feature = "strict-invariants")))]
macro_rules! debug_invariants {
    ($s:expr) => {
        ()
    };
}

pub(crate) use debug_invariants;
