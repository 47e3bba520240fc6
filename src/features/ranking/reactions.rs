/// A user's standing for one emoji
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionRank {
    /// 1-based; ties share a rank
    pub rank: usize,
    pub total: u64,
}

/// Rank `user_id` within per-author `totals`.
///
/// The rank is one more than the number of authors with a strictly greater total.
/// Returns `None` when the user has no reactions recorded.
pub fn reaction_rank(totals: &[(u64, u64)], user_id: u64) -> Option<ReactionRank> {
    let total = totals
        .iter()
        .find(|(author, total)| *author == user_id && *total > 0)
        .map(|(_, total)| *total)?;

    let ahead = totals.iter().filter(|(_, other)| *other > total).count();
    Some(ReactionRank {
        rank: ahead + 1,
        total,
    })
}
