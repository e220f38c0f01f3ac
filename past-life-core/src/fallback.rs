//! Locally synthesized story used when narrative generation fails.

/// Builds the fixed fallback sentence.
///
/// Always contains `name`, `title` and `year_label` verbatim, so the resolved
/// facts stay visible even without a generated narrative.
pub fn fallback_story(name: &str, title: &str, year_label: &str) -> String {
    format!(
        "신비로운 운명의 가림막이 잠시 드리워졌지만, {name}님은 분명 {year_label}의 {title}이었습니다. \
         (운명의 기록이 흐려져 기본 이야기를 전해 드립니다)"
    )
}
