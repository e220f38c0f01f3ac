//! Prompt builder: fixed storyteller persona + templated user instructions.
//!
//! Templates are plain data with `{name}`, `{title}` and `{year_label}`
//! placeholders, so the wording can be swapped without touching the façade.

/// Default system persona.
pub const DEFAULT_SYSTEM: &str = "당신은 신비로운 전생 스토리텔러입니다.";

/// Default user instructions.
pub const DEFAULT_USER: &str = r#"
당신은 우주 직계 전생 술사입니다. 
유저의 이름, 전생의 직업, 출생 연도를 바탕으로 아주 구체적이고, 흥미롭고, 약간의 '병맛'과 '바이럴 포인트'가 섞인 전생 스토리를 들려주세요.

유저 이름: {name}
전생: {title}
활동 시기: {year_label}

조건:
1. 문체: 장엄하고 신비로우면서도 중간중간 현대적인 유머와 어처구니없는 설정이 섞인 한국어 구어체.
2. 구성:
   - 도입: 전생의 정체와 시대적 배경 설명.
   - 핵심 사건: 전생에서 겪었던 가장 임팩트 있는 명장면이나 사건 (아주 구체적으로).
   - 나비 효과: 그 전생의 소소하거나 어이없는 행동이 현대 역사나 인류 문명에 끼친 '말도 안 되는' 거대한 영향력.
3. 분량: 400~500자 내외로 작성하되, 가독성을 위해 반드시 3~4개의 단락으로 나누고 단락 사이에는 빈 줄(Double Newline)을 넣어주세요.
4. "{name}님은 {year_label}에 {title}(이)었습니다."로 시작하세요.
5. 유저가 이 스토리를 보고 '이게 뭐야 ㅋㅋㅋ' 하면서 공유하고 싶게 만드세요.
"#;

/// System + user prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    system: String,
    user: String,
}

impl PromptTemplate {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    /// Fills the user template.
    ///
    /// # Example
    /// ```
    /// # use storyteller::PromptTemplate;
    /// let prompt = PromptTemplate::default().render("Alice", "King", "서기 1200년");
    /// assert!(prompt.contains("Alice님은 서기 1200년에 King(이)었습니다."));
    /// ```
    pub fn render(&self, name: &str, title: &str, year_label: &str) -> String {
        let slots = [("{name}", name), ("{title}", title), ("{year_label}", year_label)];

        // Single pass: substituted values are never rescanned.
        let mut out = String::with_capacity(self.user.len() + name.len() + title.len() + year_label.len());
        let mut rest = self.user.trim();
        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];
            match slots.iter().find(|(key, _)| rest.starts_with(key)) {
                Some((key, value)) => {
                    out.push_str(value);
                    rest = &rest[key.len()..];
                }
                None => {
                    out.push('{');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM, DEFAULT_USER)
    }
}
