use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MathVariant {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
    DoubleStruck,
    BoldFraktur,
    Script,
    BoldScript,
    Fraktur,
    SansSerif,
    BoldSansSerif,
    SansSerifItalic,
    SansSerifBoldItalic,
    Monospace,
}

impl MathVariant {
    pub fn is_bold(self) -> bool {
        matches!(
            self,
            MathVariant::Bold
                | MathVariant::BoldItalic
                | MathVariant::BoldFraktur
                | MathVariant::BoldScript
                | MathVariant::BoldSansSerif
                | MathVariant::SansSerifBoldItalic
        )
    }

    pub fn is_italic(self) -> bool {
        matches!(
            self,
            MathVariant::Italic | MathVariant::BoldItalic | MathVariant::SansSerifItalic | MathVariant::SansSerifBoldItalic
        )
    }
}
