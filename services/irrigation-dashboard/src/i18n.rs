//! Localized strings shown by the dashboard

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dashboard display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ar,
    Fr,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Ar => write!(f, "ar"),
            Language::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for Language {
    type Err = crate::DashboardError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Language::Ar),
            "fr" => Ok(Language::Fr),
            other => Err(crate::DashboardError::Config(format!(
                "Unsupported language '{}', expected 'ar' or 'fr'",
                other
            ))),
        }
    }
}

/// Fixed string table for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    pub connected_notice: &'static str,
    pub disconnected_notice: &'static str,
    pub status_online: &'static str,
    pub status_offline: &'static str,
    pub new_image_notice: &'static str,
    pub no_image: &'static str,
    pub command_failed: &'static str,
    pub start_sent: &'static str,
    pub stop_sent: &'static str,
    pub listening: &'static str,
    pub voice_button_listening: &'static str,
    pub voice_button_idle: &'static str,
    pub voice_unavailable: &'static str,
    pub not_recognized: &'static str,
    heard_prefix: &'static str,
    recognized_prefix: &'static str,
    recognized_suffix: &'static str,
    recognition_error_prefix: &'static str,
    server_reply_prefix: &'static str,
    server_error_prefix: &'static str,
}

const ARABIC: Translations = Translations {
    connected_notice: "تم الاتصال في الوقت الحقيقي",
    disconnected_notice: "تم قطع الاتصال بالخادم",
    status_online: "متصل",
    status_offline: "غير متصل",
    new_image_notice: "تم استلام صورة جديدة",
    no_image: "لم يتم تحميل أي صورة بعد.",
    command_failed: "حدث خطأ أثناء الاتصال بالخادم.",
    start_sent: "تم إرسال أمر بدء الري.",
    stop_sent: "تم إرسال أمر إيقاف الري.",
    listening: "جارٍ الاستماع...",
    voice_button_listening: "استماع...",
    voice_button_idle: "تفعيل",
    voice_unavailable: "عذراً، لا يدعم هذا الجهاز التعرف على الصوت.",
    not_recognized:
        "لم يتم التعرف على الأمر. جرّب \"ابدأ الري\"، \"أوقف الري\"، أو \"تحقق من الحالة\".",
    heard_prefix: "قلت: ",
    recognized_prefix: "تم التعرف على الأمر: ",
    recognized_suffix: ". جارٍ الإرسال إلى الخادم...",
    recognition_error_prefix: "خطأ في التعرف: ",
    server_reply_prefix: "رد الخادم: ",
    server_error_prefix: "خطأ: ",
};

const FRENCH: Translations = Translations {
    connected_notice: "Connecté en temps réel",
    disconnected_notice: "Connexion au serveur perdue",
    status_online: "Connecté",
    status_offline: "Déconnecté",
    new_image_notice: "Nouvelle image reçue",
    no_image: "Aucune image n'a encore été téléchargée.",
    command_failed: "Erreur lors de la communication avec le serveur.",
    start_sent: "Commande de démarrage de l'irrigation envoyée.",
    stop_sent: "Commande d'arrêt de l'irrigation envoyée.",
    listening: "Écoute en cours...",
    voice_button_listening: "Écoute...",
    voice_button_idle: "Activer",
    voice_unavailable: "Désolé, la reconnaissance vocale n'est pas disponible.",
    not_recognized: "Commande non reconnue. Essayez \"démarre l'irrigation\", \
                     \"arrête l'irrigation\", ou \"vérifie le statut\".",
    heard_prefix: "Vous avez dit : ",
    recognized_prefix: "Commande reconnue : ",
    recognized_suffix: ". Envoi au serveur...",
    recognition_error_prefix: "Erreur de reconnaissance : ",
    server_reply_prefix: "Réponse du serveur : ",
    server_error_prefix: "Erreur : ",
};

impl Translations {
    pub fn for_language(language: Language) -> &'static Translations {
        match language {
            Language::Ar => &ARABIC,
            Language::Fr => &FRENCH,
        }
    }

    pub fn heard(&self, transcript: &str) -> String {
        format!("{}\"{}\"", self.heard_prefix, transcript)
    }

    pub fn recognized(&self, command: &str) -> String {
        format!(
            "{}\"{}\"{}",
            self.recognized_prefix, command, self.recognized_suffix
        )
    }

    pub fn recognition_error(&self, reason: &str) -> String {
        format!("{}{}", self.recognition_error_prefix, reason)
    }

    pub fn server_reply(&self, message: &str) -> String {
        format!("{}{}", self.server_reply_prefix, message)
    }

    pub fn server_error(&self, message: &str) -> String {
        format!("{}{}", self.server_error_prefix, message)
    }
}
