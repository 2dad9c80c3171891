//! Business context parsing
//!
//! Turns the free-text business description a user supplies ("行业：在线教育，
//! 目标：提升注册转化" or "Industry: SaaS, Goal: more signups") into the
//! structured fields prioritization and reporting use.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNSPECIFIED: &str = "unspecified";

const REGISTRATION_KEYWORDS: &[&str] = &[
    "注册", "获取用户", "获取线索", "用户增长", "lead", "signup", "sign up", "register",
];

const TRANSACTION_KEYWORDS: &[&str] = &[
    "购买", "交易", "下单", "支付", "成交", "销售", "buy", "purchase", "order", "pay", "checkout",
    "sales",
];

const CONTENT_KEYWORDS: &[&str] = &[
    "阅读", "浏览", "内容消费", "内容发现", "观看", "学习", "了解", "read", "view", "learn",
    "watch",
];

const CONVERSION_KEYWORDS: &[&str] = &[
    "转化", "销售", "注册", "conversion", "convert", "sales", "signup", "sign up", "register",
    "purchase",
];

// Value capture shared by every label: up to the next clause separator.
macro_rules! field_pattern {
    ($label:expr) => {
        Regex::new(concat!($label, r"\s*([^，,。；;.\n]+)")).unwrap()
    };
}

lazy_static! {
    static ref INDUSTRY: Vec<Regex> = vec![
        field_pattern!(r"行业[:：]?"),
        field_pattern!(r"领域[:：]?"),
        field_pattern!(r"(?i)\bindustry\s*[:：]"),
    ];
    static ref BUSINESS_GOAL: Vec<Regex> = vec![
        field_pattern!(r"业务目标[:：]?"),
        field_pattern!(r"核心目标[:：]?"),
        field_pattern!(r"目标[:：]"),
        field_pattern!(r"(?i)\b(?:business\s+)?goal\s*[:：]"),
    ];
    static ref KEY_ACTION: Vec<Regex> = vec![
        field_pattern!(r"关键操作[:：]?"),
        field_pattern!(r"用户操作[:：]?"),
        field_pattern!(r"操作[:：]"),
        field_pattern!(r"(?i)\bkey\s+action\s*[:：]"),
    ];
    static ref TARGET_USERS: Vec<Regex> = vec![
        field_pattern!(r"目标用户[:：]?"),
        field_pattern!(r"用户群体[:：]?"),
        field_pattern!(r"用户[:：]"),
        field_pattern!(r"(?i)\b(?:target\s+)?(?:users|audience)\s*[:：]"),
    ];
    static ref TRAILING_SEPARATORS: Regex = Regex::new(r"^[\s，,；;。.]+|[\s，,；;。.]+$").unwrap();
    static ref REPEATED_SEPARATORS: Regex = Regex::new(r"\s*[，,；;]\s*[，,；;]+\s*").unwrap();
}

/// Page scenario, used to pick the analysis framing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Registration,
    Transaction,
    Content,
    General,
}

impl Scenario {
    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Registration => "registration",
            Scenario::Transaction => "transaction",
            Scenario::Content => "content",
            Scenario::General => "general",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContext {
    pub industry: Option<String>,
    pub business_goal: Option<String>,
    pub key_action: Option<String>,
    pub target_users: Option<String>,
    /// Text left after the labelled fields were removed
    #[serde(default)]
    pub other_info: String,
    #[serde(default)]
    pub raw: String,
}

impl BusinessContext {
    /// Parse a free-text description; the first matching pattern per field wins
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self {
                raw: text.to_string(),
                ..Self::default()
            };
        }

        let mut other = text.to_string();
        let mut extract = |patterns: &[Regex]| -> Option<String> {
            let mut found = None;
            for re in patterns {
                if found.is_none() {
                    found = re
                        .captures(text)
                        .and_then(|c| c.get(1))
                        .map(|m| m.as_str().trim().to_string())
                        .filter(|v| !v.is_empty());
                }
                other = re.replace(&other, "").into_owned();
            }
            found
        };

        let industry = extract(&INDUSTRY);
        let business_goal = extract(&BUSINESS_GOAL);
        let key_action = extract(&KEY_ACTION);
        let target_users = extract(&TARGET_USERS);

        let other = REPEATED_SEPARATORS.replace_all(&other, "，");
        let other_info = TRAILING_SEPARATORS.replace_all(&other, "").into_owned();

        Self {
            industry,
            business_goal,
            key_action,
            target_users,
            other_info,
            raw: text.to_string(),
        }
    }

    pub fn industry(&self) -> &str {
        self.industry.as_deref().unwrap_or(UNSPECIFIED)
    }

    pub fn business_goal(&self) -> &str {
        self.business_goal.as_deref().unwrap_or(UNSPECIFIED)
    }

    pub fn key_action(&self) -> &str {
        self.key_action.as_deref().unwrap_or(UNSPECIFIED)
    }

    pub fn target_users(&self) -> &str {
        self.target_users.as_deref().unwrap_or(UNSPECIFIED)
    }

    /// Registration, then transaction, then content vocabularies, over the
    /// goal and key action
    pub fn scenario(&self) -> Scenario {
        let haystack = format!(
            "{} {}",
            self.business_goal.as_deref().unwrap_or(""),
            self.key_action.as_deref().unwrap_or("")
        )
        .to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| haystack.contains(k));

        if mentions(REGISTRATION_KEYWORDS) {
            Scenario::Registration
        } else if mentions(TRANSACTION_KEYWORDS) {
            Scenario::Transaction
        } else if mentions(CONTENT_KEYWORDS) {
            Scenario::Content
        } else {
            Scenario::General
        }
    }

    /// Whether the business goal is about conversion, sales or signups
    pub fn is_conversion_oriented(&self) -> bool {
        let goal = self.business_goal.as_deref().unwrap_or("").to_lowercase();
        CONVERSION_KEYWORDS.iter().any(|k| goal.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_is_unspecified() {
        let ctx = BusinessContext::parse("   ");
        assert_eq!(ctx.industry(), UNSPECIFIED);
        assert_eq!(ctx.business_goal(), UNSPECIFIED);
        assert_eq!(ctx.other_info, "");
        assert_eq!(ctx.scenario(), Scenario::General);
        assert!(!ctx.is_conversion_oriented());
    }

    #[test]
    fn test_chinese_labels() {
        let ctx = BusinessContext::parse("行业：在线教育，业务目标：提升注册转化，关键操作：点击免费试用，目标用户：职场新人");
        assert_eq!(ctx.industry.as_deref(), Some("在线教育"));
        assert_eq!(ctx.business_goal.as_deref(), Some("提升注册转化"));
        assert_eq!(ctx.key_action.as_deref(), Some("点击免费试用"));
        assert_eq!(ctx.target_users.as_deref(), Some("职场新人"));
        assert_eq!(ctx.other_info, "");
        assert_eq!(ctx.scenario(), Scenario::Registration);
        assert!(ctx.is_conversion_oriented());
    }

    #[test]
    fn test_target_users_do_not_leak_into_goal() {
        let ctx = BusinessContext::parse("目标用户：大学生");
        assert_eq!(ctx.business_goal, None);
        assert_eq!(ctx.target_users.as_deref(), Some("大学生"));
    }

    #[test]
    fn test_english_labels_and_leftovers() {
        let ctx = BusinessContext::parse("Industry: e-commerce, Goal: increase sales, Key action: checkout. Launching in spring");
        assert_eq!(ctx.industry.as_deref(), Some("e-commerce"));
        assert_eq!(ctx.business_goal.as_deref(), Some("increase sales"));
        assert_eq!(ctx.key_action.as_deref(), Some("checkout"));
        assert_eq!(ctx.other_info, "Launching in spring");
        assert_eq!(ctx.scenario(), Scenario::Transaction);
        assert!(ctx.is_conversion_oriented());
    }

    #[test]
    fn test_unlabelled_text_is_other_info() {
        let ctx = BusinessContext::parse("A blog about gardening");
        assert_eq!(ctx.industry, None);
        assert_eq!(ctx.other_info, "A blog about gardening");
    }

    #[test]
    fn test_content_scenario() {
        let ctx = BusinessContext::parse("目标：提升文章阅读时长");
        assert_eq!(ctx.scenario(), Scenario::Content);
        assert!(!ctx.is_conversion_oriented());
    }
}
