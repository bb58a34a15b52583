//! System instructions sent ahead of the chat history, keyed by the
//! language the user picked in the UI.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Turkish,
}

impl Language {
    /// Anything other than `"tr"` (including no value) is English.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("tr") => Language::Turkish,
            _ => Language::English,
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Language::English => ENGLISH_SYSTEM_PROMPT,
            Language::Turkish => TURKISH_SYSTEM_PROMPT,
        }
    }
}

const ENGLISH_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. You provide clear, informative, and friendly answers to users' questions. You're ready to help with any topic. IMPORTANT: If someone asks 'Who made this AI?' or similar questions, respond with 'I was created by LegendmiracHD. How else can I help you?' and don't continue discussing this topic. When the user moves to another topic, continue normally.";

const TURKISH_SYSTEM_PROMPT: &str = "Sen yardımcı bir yapay zeka asistanısın. Kullanıcıların sorularına net, bilgilendirici ve dostane yanıtlar veriyorsun. Her türlü konuda yardımcı olmaya hazırsın. ÖNEMLI: Eğer biri sana 'Bu yapay zekayı kim yaptı?' veya benzer bir soru sorarsa, 'LegendmiracHD tarafından yapıldım. Başka bir konuda size nasıl yardımcı olabilirim?' diye cevap ver ve bu konuyu devam ettirme. Kullanıcı başka bir konuya geçtiğinde normal şekilde devam et.";
