/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Configuration flags used to control aspects of document
//! validation.
//!
//! Read the documentation on each flag's `O_*` constant for
//! an explanation of it's purpose.
//!
//! ```
//! # use yamlscan::flag::*;
//! // You can use bitwise operators
//! let bitwise = O_NIL | O_STRICT_RUNS | O_FAIL_FAST;
//!
//! // Or if you prefer, method chaining
//! let chaining = Flags::new().strict_runs().no_deny_warnings().fail_fast();
//!
//! assert_eq!(bitwise, chaining);
//! ```

use bitflags::bitflags;

/// An empty, zeroed flag set. This is the default set,
/// with all other flags disabled.
///
/// With no flags set, every structural violation in a
/// document is collected, tabs are only rejected when they
/// follow spaces (or indent a block line) and warnings do
/// not invalidate a document.
pub const O_NIL: Flags = Flags::empty();

/// Stop validating a document at the first structural
/// violation, rather than collecting all of them.
///
/// Useful when the caller only cares about a document's
/// validity, and not why it is invalid.
pub const O_FAIL_FAST: Flags = Flags::FAIL_FAST;

/// Treat indentation runs symmetrically.
///
/// By default, only a tab following spaces inside a run of
/// whitespace is rejected. With this flag set, a space
/// following a tab in the same run is rejected too.
pub const O_STRICT_RUNS: Flags = Flags::STRICT_RUNS;

/// Treat warnings as errors.
///
/// Some diagnostics, such as an unknown directive or a
/// comment running into the end of input, are produced by
/// well formed documents. Normally these are surfaced as
/// warnings, with this flag set they also invalidate the
/// document they were found in.
pub const O_DENY_WARNINGS: Flags = Flags::DENY_WARNINGS;

impl Flags
{
    /// Instantiates a new, empty flag set
    pub const fn new() -> Self
    {
        O_NIL
    }

    /// Nulls the flag set, resetting it to empty
    pub const fn nil(self) -> Self
    {
        O_NIL
    }

    /// Applies [`O_FAIL_FAST`] to this flag set
    pub const fn fail_fast(self) -> Self
    {
        self.union(O_FAIL_FAST)
    }

    /// Removes [`O_FAIL_FAST`] from this flag set
    pub const fn no_fail_fast(self) -> Self
    {
        self.difference(O_FAIL_FAST)
    }

    /// Applies [`O_STRICT_RUNS`] to this flag set
    pub const fn strict_runs(self) -> Self
    {
        self.union(O_STRICT_RUNS)
    }

    /// Removes [`O_STRICT_RUNS`] from this flag set
    pub const fn no_strict_runs(self) -> Self
    {
        self.difference(O_STRICT_RUNS)
    }

    /// Applies [`O_DENY_WARNINGS`] to this flag set
    pub const fn deny_warnings(self) -> Self
    {
        self.union(O_DENY_WARNINGS)
    }

    /// Removes [`O_DENY_WARNINGS`] from this flag set
    pub const fn no_deny_warnings(self) -> Self
    {
        self.difference(O_DENY_WARNINGS)
    }
}

bitflags! {
    /// Controls aspects of validation, read each flag for more information.
    #[derive(Default)]
    pub struct Flags: u32 {
        /// See [`O_FAIL_FAST`]
        const FAIL_FAST     = 0b00000001;
        /// See [`O_STRICT_RUNS`]
        const STRICT_RUNS   = 0b00000010;
        /// See [`O_DENY_WARNINGS`]
        const DENY_WARNINGS = 0b00000100;
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builders()
    {
        let flags = Flags::new().fail_fast().deny_warnings().no_fail_fast();

        assert_eq!(flags, O_DENY_WARNINGS);
        assert_eq!(flags.nil(), Flags::default());
    }
}
