//! 成绩换算与评语分档

use std::fmt;

/// 成绩档位，区间下界包含在内
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    /// >= 80%
    Excellent,
    /// 60% - 79%
    Good,
    /// < 60%
    KeepLearning,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80..=u32::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            _ => ScoreBand::KeepLearning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::KeepLearning => "keep learning",
        }
    }

    /// 结果页横幅文案
    pub fn banner(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "🌟 Excellent! You nailed it!",
            ScoreBand::Good => "👍 Good job! Keep practicing!",
            ScoreBand::KeepLearning => "💪 Keep learning! Try again!",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 得分百分比，四舍五入到整数；总题数为 0 时为 0
pub fn percentage(score: u32, total_questions: u32) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    (f64::from(score) / f64::from(total_questions) * 100.0).round() as u32
}
