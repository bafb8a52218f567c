//! Critical-header deferral (spec §4.7, C8).
//!
//! Bridges a JOSE header's `crit` member and application policy: a
//! decrypter/verifier is configured with the set of extension names it is
//! willing to *defer* (trust the application to have already handled), and
//! [`CriticalHeaderPolicy::check`] rejects anything else.

use alloc::collections::BTreeSet;
use alloc::string::String;

use crate::error::{Error, Result};
use crate::header::Crit;

/// The set of `crit` names a verifier/decrypter will accept without
/// understanding them itself, trusting the application layer to enforce
/// their semantics out of band.
///
/// Per spec §9 Open Question (a), this engine implements the newer
/// two-generation critical-header API as a single `deferred` set rather
/// than the older `getIgnoredCriticalHeaders` split.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalHeaderPolicy {
    deferred: BTreeSet<String>,
}

impl CriticalHeaderPolicy {
    /// A policy that defers nothing: any non-empty `crit` is rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy deferring exactly `names`.
    pub fn deferring<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            deferred: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a header's `crit` value against this policy.
    ///
    /// Passes if `crit` is absent, or present with every name a member of
    /// [`Self::deferred`] (including the empty set). An explicit JSON
    /// `null` always fails, and any name outside the deferred set fails.
    pub fn check(&self, crit: &Crit) -> Result<()> {
        match crit {
            None => Ok(()),
            Some(None) => Err(Error::UnsupportedCrit),
            Some(Some(names)) => {
                if names.iter().all(|name| self.deferred.contains(name)) {
                    Ok(())
                } else {
                    Err(Error::UnsupportedCrit)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    #[test]
    fn absent_crit_passes() {
        let policy = CriticalHeaderPolicy::new();
        assert_eq!(policy.check(&None), Ok(()));
    }

    #[test]
    fn explicit_null_is_rejected() {
        let policy = CriticalHeaderPolicy::deferring(["exp"]);
        assert_eq!(policy.check(&Some(None)), Err(Error::UnsupportedCrit));
    }

    #[test]
    fn deferred_name_passes() {
        let policy = CriticalHeaderPolicy::deferring(["exp"]);
        let crit = Some(Some(BTreeSet::from(["exp".into()])));
        assert_eq!(policy.check(&crit), Ok(()));
    }

    #[test]
    fn undeferred_name_is_rejected() {
        let policy = CriticalHeaderPolicy::new();
        let crit = Some(Some(BTreeSet::from(["exp".into()])));
        assert_eq!(policy.check(&crit), Err(Error::UnsupportedCrit));
    }

    #[test]
    fn empty_crit_set_passes() {
        let policy = CriticalHeaderPolicy::new();
        let crit = Some(Some(BTreeSet::new()));
        assert_eq!(policy.check(&crit), Ok(()));
    }
}
