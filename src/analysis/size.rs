/// Size bucket for a pull request, based on additions plus deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeLabel {
    /// Fewer than 50 changed lines
    XS,
    /// 50 to 199
    S,
    /// 200 to 499
    M,
    /// 500 to 999
    L,
    /// 1000 or more
    XL,
}

impl SizeLabel {
    pub fn from_changes(additions: usize, deletions: usize) -> Self {
        match additions + deletions {
            0..=49 => SizeLabel::XS,
            50..=199 => SizeLabel::S,
            200..=499 => SizeLabel::M,
            500..=999 => SizeLabel::L,
            _ => SizeLabel::XL,
        }
    }

    /// GitHub label name, e.g. `size/M`.
    pub fn label(&self) -> &'static str {
        match self {
            SizeLabel::XS => "size/XS",
            SizeLabel::S => "size/S",
            SizeLabel::M => "size/M",
            SizeLabel::L => "size/L",
            SizeLabel::XL => "size/XL",
        }
    }

    pub fn comment(&self) -> &'static str {
        match self {
            SizeLabel::XS => "✅ This is a very small PR. Great for quick reviews!",
            SizeLabel::S => "✅ This is a small PR. Should be easy to review.",
            SizeLabel::M => "⚠️ This is a medium-sized PR. Consider breaking it into smaller PRs.",
            SizeLabel::L => "⚠️ This is a large PR. Please consider breaking it into smaller, focused PRs.",
            SizeLabel::XL => "🚨 This is a very large PR. Please break it into smaller PRs.",
        }
    }
}

impl std::fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
