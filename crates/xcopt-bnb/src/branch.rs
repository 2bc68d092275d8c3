// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Branch representation
//!
//! A branch is a partial assignment of route roles (start, turnpoints and
//! finish, depending on the shape) to track index *ranges*. A wide range
//! is the coarse view of its candidate fixes; splitting it in half is one
//! refinement step. All ranges singleton = the branch is complete.
//!
//! Role ranges are kept monotone-feasible at all times: after any split the
//! ranges are re-clamped so a strictly increasing selection exists, and a
//! branch whose clamp fails is dead.

use smallvec::SmallVec;

/// The most roles any shape assigns (open distance with three turnpoints).
pub(crate) const MAX_ROLES: usize = 5;

/// Identity of a branch.
///
/// Used solely for deterministic tie-breaking in the frontier and for
/// refinement continuity (a split whose sibling dies keeps the parent's
/// identity); never for equality beyond ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BranchId {
    /// Sequentially assigned identity; the root branch is `Seq(0)`.
    Seq(u64),
    /// Structured identity: the path of split choices that led here.
    Path(SmallVec<[u8; 16]>),
}

impl BranchId {
    /// The identity of a child created by taking split side `choice`.
    pub fn child(&self, choice: u8) -> Self {
        match self {
            BranchId::Seq(_) => {
                let mut path = SmallVec::new();
                path.push(choice);
                BranchId::Path(path)
            }
            BranchId::Path(path) => {
                let mut path = path.clone();
                path.push(choice);
                BranchId::Path(path)
            }
        }
    }
}

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchId::Seq(sequence) => write!(f, "#{}", sequence),
            BranchId::Path(path) => {
                write!(f, "#")?;
                for choice in path {
                    write!(f, "{}", choice)?;
                }
                Ok(())
            }
        }
    }
}

/// An inclusive range of candidate track indices for one role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RoleRange {
    pub lo: u32,
    pub hi: u32,
}

impl RoleRange {
    #[inline]
    pub fn new(lo: u32, hi: u32) -> Self {
        debug_assert!(
            lo <= hi,
            "called `RoleRange::new` with lo {} greater than hi {}",
            lo,
            hi
        );
        Self { lo, hi }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.hi - self.lo
    }

    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.lo == self.hi
    }

    #[inline]
    pub fn midpoint(&self) -> u32 {
        self.lo + self.width() / 2
    }
}

/// One live node of the search: role ranges, bounds and refinement depth.
///
/// Exclusively owned by the frontier; destroyed on expansion (replaced by
/// its children) or on pruning.
#[derive(Clone, Debug)]
pub(crate) struct Branch {
    pub id: BranchId,
    pub roles: SmallVec<[RoleRange; MAX_ROLES]>,
    /// Upper bound on the score of any completion. Sound by construction.
    pub optimistic: f64,
    /// Score of the branch's midpoint sample, if one was legal.
    pub realized: f64,
    /// Number of splits on the path from the root.
    pub depth: u32,
}

impl Branch {
    /// Creates the root branch covering `[launch, landing]` with `num_roles`
    /// roles, each clamped so a strictly increasing selection exists.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `num_roles` fixes are available; the caller
    /// validates that first.
    pub fn root(launch: u32, landing: u32, num_roles: usize) -> Self {
        assert!(
            (landing - launch) as usize + 1 >= num_roles,
            "called `Branch::root` with {} roles over {} fixes",
            num_roles,
            landing - launch + 1
        );
        let roles = (0..num_roles)
            .map(|role| {
                RoleRange::new(
                    launch + role as u32,
                    landing - (num_roles - 1 - role) as u32,
                )
            })
            .collect();
        Self {
            id: BranchId::Seq(0),
            roles,
            optimistic: f64::INFINITY,
            realized: 0.0,
            depth: 0,
        }
    }

    /// Returns `true` when every role is assigned a single index.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.roles.iter().all(RoleRange::is_singleton)
    }

    /// The complete assignment, if all roles are singletons.
    pub fn assignment(&self) -> Option<SmallVec<[u32; MAX_ROLES]>> {
        if !self.is_complete() {
            return None;
        }
        Some(self.roles.iter().map(|range| range.lo).collect())
    }

    /// Index of the widest role range; ties go to the earliest role.
    pub fn widest_role(&self) -> usize {
        let mut widest = 0;
        for (role, range) in self.roles.iter().enumerate() {
            if range.width() > self.roles[widest].width() {
                widest = role;
            }
        }
        debug_assert!(role_is_splittable(&self.roles[widest]) || self.is_complete());
        widest
    }

    /// A strictly increasing sample near every range midpoint, if the
    /// ranges admit one.
    pub fn midpoint_assignment(&self) -> Option<SmallVec<[u32; MAX_ROLES]>> {
        let mut sample = SmallVec::new();
        let mut previous: Option<u32> = None;
        for range in &self.roles {
            let mut candidate = range.midpoint();
            if let Some(previous) = previous {
                candidate = candidate.max(previous + 1);
            }
            if candidate > range.hi {
                return None;
            }
            sample.push(candidate);
            previous = Some(candidate);
        }
        Some(sample)
    }

    /// Re-clamps the ranges so a strictly increasing selection exists.
    /// Returns `false` if no selection remains.
    pub fn clamp_monotone(&mut self) -> bool {
        for role in 1..self.roles.len() {
            let floor = self.roles[role - 1].lo + 1;
            if floor > self.roles[role].lo {
                self.roles[role].lo = floor;
            }
            if self.roles[role].lo > self.roles[role].hi {
                return false;
            }
        }
        for role in (0..self.roles.len().saturating_sub(1)).rev() {
            let ceiling = self.roles[role + 1].hi - 1;
            if ceiling < self.roles[role].hi {
                self.roles[role].hi = ceiling;
            }
            if self.roles[role].lo > self.roles[role].hi {
                return false;
            }
        }
        true
    }

    /// Splits the widest role range in half.
    ///
    /// When both halves stay feasible the children carry fresh path
    /// identities; when only one survives, it keeps this branch's identity:
    /// that is a refinement of the same branch at finer resolution.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the branch is complete.
    pub fn split(&self) -> (Option<Branch>, Option<Branch>) {
        debug_assert!(
            !self.is_complete(),
            "called `Branch::split` on a complete branch"
        );
        let role = self.widest_role();
        let range = self.roles[role];
        let midpoint = range.midpoint();

        let mut left = self.child_with(role, RoleRange::new(range.lo, midpoint));
        let mut right = self.child_with(role, RoleRange::new(midpoint + 1, range.hi));
        let left_alive = left.clamp_monotone();
        let right_alive = right.clamp_monotone();

        match (left_alive, right_alive) {
            (true, true) => {
                left.id = self.id.child(0);
                right.id = self.id.child(1);
                (Some(left), Some(right))
            }
            (true, false) => {
                left.id = self.id.clone();
                (Some(left), None)
            }
            (false, true) => {
                right.id = self.id.clone();
                (None, Some(right))
            }
            (false, false) => (None, None),
        }
    }

    fn child_with(&self, role: usize, range: RoleRange) -> Branch {
        let mut roles = self.roles.clone();
        roles[role] = range;
        Branch {
            id: self.id.clone(),
            roles,
            optimistic: self.optimistic,
            realized: 0.0,
            depth: self.depth + 1,
        }
    }
}

#[inline]
fn role_is_splittable(range: &RoleRange) -> bool {
    !range.is_singleton()
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Branch({}, depth {}, bound {:.3}, realized {:.3}, roles",
            self.id, self.depth, self.optimistic, self.realized
        )?;
        for range in &self.roles {
            write!(f, " [{}..{}]", range.lo, range.hi)?;
        }
        write!(f, ")")
    }
}
