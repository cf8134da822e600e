// --- File: crates/agenda_assistant/src/localization.rs ---
//! Bot message catalogue in English, Portuguese and Spanish.

use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMessage {
    Greeting,
    WorkingOnIt,
    CheckingAroundTime,
    CheckingNext,
    SuggestionsIntro,
    NoOpeningsForRequest,
    NoImmediateOpenings,
    HelpPrompt,
    TechnicalError,
    Confirming,
    DefaultSubject,
    DefaultAttendeeName,
}

/// Shown once when no language has been chosen yet.
pub const MULTILINGUAL_GREETINGS: [&str; 3] = [
    "Hello! I'm Agenda AI, your scheduling assistant. I understand English, Portuguese, and Spanish. How can I help you today?",
    "Olá! Sou a Agenda AI, sua assistente de agendamento. Entendo inglês, português e espanhol. Como posso ajudar hoje?",
    "¡Hola! Soy Agenda AI, tu asistente de programación. Entiendo inglés, portugués y español. ¿Cómo puedo ayudarte hoy?",
];

pub fn text(message: BotMessage, language: Language) -> &'static str {
    let (en, pt, es) = match message {
        BotMessage::Greeting => (
            "Hello! I'm your Agenda AI assistant. How can I help you schedule your appointment today? I also understand Portuguese and Spanish.",
            "Olá! Sou sua assistente Agenda AI. Como posso ajudar a agendar seu compromisso hoje? Também entendo inglês e espanhol.",
            "¡Hola! Soy tu asistente Agenda AI. ¿Cómo puedo ayudarte a programar tu cita hoy? También entiendo inglés y portugués.",
        ),
        BotMessage::WorkingOnIt => (
            "Okay, let me see what I can do for your request...",
            "Ok, deixe-me ver o que posso fazer pela sua solicitação...",
            "Ok, déjame ver qué puedo hacer por tu solicitud...",
        ),
        BotMessage::CheckingAroundTime => (
            "Got it! Let me check for available slots around that time for you...",
            "Entendi! Deixe-me verificar os horários disponíveis próximos a esse horário para você...",
            "¡Entendido! Déjame revisar los horarios disponibles cerca de esa hora para ti...",
        ),
        BotMessage::CheckingNext => (
            "Certainly! Let me find the next available slots for you...",
            "Claro! Deixe-me verificar os próximos horários disponíveis para você...",
            "¡Claro! Déjame revisar los próximos horarios disponibles para ti...",
        ),
        BotMessage::SuggestionsIntro => (
            "Here are some available slots. Please choose one, or let me know if another time works better:",
            "Aqui estão alguns horários disponíveis. Por favor, escolha um, ou me diga se outro horário funciona melhor:",
            "Aquí hay algunos horarios disponibles. Por favor, elige uno, o dime si otro horario te viene mejor:",
        ),
        BotMessage::NoOpeningsForRequest => (
            "I'm sorry, I couldn't find any openings that match your request. Would you like to try a different time or perhaps another day?",
            "Desculpe, não consegui encontrar nenhum horário disponível que corresponda à sua solicitação. Gostaria de tentar um horário ou dia diferente?",
            "Lo siento, no pude encontrar ningún horario disponible que coincida con tu solicitud. ¿Te gustaría intentar una hora o día diferente?",
        ),
        BotMessage::NoImmediateOpenings => (
            "Unfortunately, I don't see any immediate openings. Would you like to try specifying a particular time or day?",
            "Infelizmente, não vejo nenhum horário disponível no momento. Gostaria de tentar especificar um horário ou dia diferente?",
            "Desafortunadamente, no veo ningún horario disponible en este momento. ¿Te gustaría intentar especificar una hora o día diferente?",
        ),
        BotMessage::HelpPrompt => (
            "I'm here to help! What can I do for you today? Would you like to schedule an appointment?",
            "Estou aqui para ajudar! O que posso fazer por você hoje? Gostaria de marcar um atendimento?",
            "¡Estoy aquí para ayudar! ¿Qué puedo hacer por ti hoy? ¿Te gustaría programar una cita?",
        ),
        BotMessage::TechnicalError => (
            "Apologies, I seem to have run into a technical hiccup. Could you please try your request again?",
            "Desculpas, parece que tive um problema técnico. Você poderia tentar sua solicitação novamente?",
            "Disculpas, parece que he tenido un contratiempo técnico. ¿Podrías intentar tu solicitud de nuevo?",
        ),
        BotMessage::Confirming => (
            "Confirming your selection...",
            "Confirmando sua seleção...",
            "Confirmando tu selección...",
        ),
        BotMessage::DefaultSubject => ("Appointment", "Compromisso", "Cita"),
        BotMessage::DefaultAttendeeName => ("Valued User", "Estimado Usuário", "Estimado Usuario"),
    };

    match language {
        Language::En => en,
        Language::Pt => pt,
        Language::Es => es,
    }
}

pub fn booking_confirmed(language: Language, subject: &str) -> String {
    match language {
        Language::En => format!(
            "Great! Your appointment for \"{subject}\" is confirmed. You'll find an \"Add to Calendar\" button below."
        ),
        Language::Pt => format!(
            "Ótimo! Seu compromisso para \"{subject}\" está confirmado. Você encontrará um botão \"Adicionar ao Calendário\" abaixo."
        ),
        Language::Es => format!(
            "¡Genial! Tu cita para \"{subject}\" está confirmada. Encontrarás un botón \"Añadir al Calendario\" abajo."
        ),
    }
}

/// Greeting for a chosen language, or the three-language set when none is chosen.
pub fn greeting_messages(language: Option<Language>) -> Vec<&'static str> {
    match language {
        Some(language) => vec![text(BotMessage::Greeting, language)],
        None => MULTILINGUAL_GREETINGS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_message_differs_per_language() {
        let messages = [
            BotMessage::Greeting,
            BotMessage::WorkingOnIt,
            BotMessage::CheckingAroundTime,
            BotMessage::CheckingNext,
            BotMessage::SuggestionsIntro,
            BotMessage::NoOpeningsForRequest,
            BotMessage::NoImmediateOpenings,
            BotMessage::HelpPrompt,
            BotMessage::TechnicalError,
            BotMessage::Confirming,
            BotMessage::DefaultSubject,
            BotMessage::DefaultAttendeeName,
        ];

        for message in messages {
            let en = text(message, Language::En);
            let pt = text(message, Language::Pt);
            assert!(!en.is_empty());
            assert_ne!(en, pt, "{:?} is not translated", message);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(text(BotMessage::DefaultSubject, Language::Es), "Cita");
        assert_eq!(text(BotMessage::DefaultAttendeeName, Language::Pt), "Estimado Usuário");
    }

    #[test]
    fn test_booking_confirmed_quotes_subject() {
        assert!(booking_confirmed(Language::En, "Dentist").contains("\"Dentist\" is confirmed"));
        assert!(booking_confirmed(Language::Pt, "Dentista").contains("\"Dentista\""));
    }

    #[test]
    fn test_greeting_messages() {
        assert_eq!(greeting_messages(None).len(), 3);
        assert_eq!(
            greeting_messages(Some(Language::Es)),
            vec![text(BotMessage::Greeting, Language::Es)]
        );
    }
}
