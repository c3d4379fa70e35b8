//! Transition function of the navigation state machine.
//!
//! `apply` is the single entry point: it validates the action against the
//! session and knowledge base, mutates the session, and returns the
//! payload for the resulting state. It never touches the embedding path.

use crate::domain::knowledge::KnowledgeBase;

use super::action::{NavigationAction, NavigationReply};
use super::errors::NavigationError;
use super::session::Session;
use super::state::NavigationState;

/// Applies one action to a session, returning the reply to render.
pub fn apply(
    knowledge: &KnowledgeBase,
    session: &mut Session,
    action: NavigationAction,
) -> Result<NavigationReply, NavigationError> {
    match action {
        NavigationAction::SelectService(service) => select_service(knowledge, session, service),
        NavigationAction::SelectCategory(category) => {
            select_category(knowledge, session, category)
        }
        NavigationAction::SelectQuestion(id) => select_question(knowledge, session, id),
        NavigationAction::Back => back(knowledge, session),
    }
}

fn select_service(
    knowledge: &KnowledgeBase,
    session: &mut Session,
    service: String,
) -> Result<NavigationReply, NavigationError> {
    if !knowledge.services().iter().any(|s| *s == service) {
        return Err(NavigationError::invalid_selection("service", service));
    }

    session.enter_service(service.clone());
    let message = format!("You selected **{service}**. What topic would you like help with?");
    Ok(render_category_selection(knowledge, &service, message))
}

fn select_category(
    knowledge: &KnowledgeBase,
    session: &mut Session,
    category: String,
) -> Result<NavigationReply, NavigationError> {
    let service = session
        .current_service()
        .ok_or(NavigationError::MissingPrecedingSelection)?
        .to_string();

    if !knowledge.categories(&service).iter().any(|c| *c == category) {
        return Err(NavigationError::invalid_selection("category", category));
    }

    session.enter_category(category.clone());
    Ok(render_question_selection(knowledge, &service, &category))
}

fn select_question(
    knowledge: &KnowledgeBase,
    session: &mut Session,
    id: String,
) -> Result<NavigationReply, NavigationError> {
    let entry = knowledge
        .entry(&id)
        .ok_or_else(|| NavigationError::QuestionNotFound(id.clone()))?;

    session.record_answer(entry.id.clone(), entry.question.clone());

    Ok(
        NavigationReply::new(NavigationState::Answer, entry.answer.clone())
            .with_question(&entry.question)
            .with_service(&entry.service)
            .with_category(&entry.category),
    )
}

fn back(
    knowledge: &KnowledgeBase,
    session: &mut Session,
) -> Result<NavigationReply, NavigationError> {
    match session.go_back() {
        NavigationState::ServiceSelection => Ok(render_service_selection(knowledge)),
        NavigationState::CategorySelection => {
            let service = session.current_service().unwrap_or_default().to_string();
            let message =
                format!("What topic would you like help with under **{service}**?");
            Ok(render_category_selection(knowledge, &service, message))
        }
        NavigationState::QuestionSelection | NavigationState::Answer => {
            let service = session.current_service().unwrap_or_default().to_string();
            let category = session.current_category().unwrap_or_default().to_string();
            Ok(render_question_selection(knowledge, &service, &category))
        }
    }
}

fn render_service_selection(knowledge: &KnowledgeBase) -> NavigationReply {
    NavigationReply::new(
        NavigationState::ServiceSelection,
        "Please select a service to continue.".to_string(),
    )
    .with_services(knowledge.services())
}

fn render_category_selection(
    knowledge: &KnowledgeBase,
    service: &str,
    mut message: String,
) -> NavigationReply {
    if let Some(overview) = knowledge.overview(service) {
        message.push_str("\n\n**Overview:** ");
        message.push_str(overview);
    }

    NavigationReply::new(NavigationState::CategorySelection, message)
        .with_categories(knowledge.categories(service))
        .with_service(service)
}

fn render_question_selection(
    knowledge: &KnowledgeBase,
    service: &str,
    category: &str,
) -> NavigationReply {
    NavigationReply::new(
        NavigationState::QuestionSelection,
        format!("Here are questions under **{category}**. Please select one:"),
    )
    .with_questions(knowledge.questions(service, category))
    .with_service(service)
    .with_category(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge::KnowledgeEntry;
    use crate::domain::navigation::UserInfo;

    fn entry(id: &str, service: &str, category: &str, question: &str) -> KnowledgeEntry {
        KnowledgeEntry {
            id: id.to_string(),
            service: service.to_string(),
            category: category.to_string(),
            question: question.to_string(),
            answer: format!("Answer: {question}"),
            keywords: vec![],
        }
    }

    fn knowledge() -> KnowledgeBase {
        KnowledgeBase::from_entries(vec![
            entry("login_000", "Login", "Overview", "about login?"),
            entry("login_001", "Login", "Login", "What login methods exist?"),
            entry("login_002", "Login", "Captcha", "What is the captcha?"),
            entry("dash_001", "General", "Dashboard", "What is on the dashboard?"),
        ])
        .unwrap()
    }

    fn session() -> Session {
        Session::new(UserInfo::new("Asha", "9876543210").unwrap())
    }

    #[test]
    fn select_service_moves_to_category_selection() {
        let kb = knowledge();
        let mut s = session();

        let reply =
            apply(&kb, &mut s, NavigationAction::SelectService("Login".into())).unwrap();

        assert_eq!(reply.state, NavigationState::CategorySelection);
        assert_eq!(reply.categories.unwrap(), vec!["Captcha", "Login"]);
        assert!(reply.message.contains("**Overview:**"));
        assert_eq!(s.current_service(), Some("Login"));
    }

    #[test]
    fn select_unknown_service_is_rejected() {
        let kb = knowledge();
        let mut s = session();

        let err = apply(&kb, &mut s, NavigationAction::SelectService("Parking".into()))
            .unwrap_err();

        assert!(matches!(err, NavigationError::InvalidSelection { kind: "service", .. }));
        assert_eq!(s.state(), NavigationState::ServiceSelection);
    }

    #[test]
    fn select_category_requires_service_first() {
        let kb = knowledge();
        let mut s = session();

        let err = apply(&kb, &mut s, NavigationAction::SelectCategory("Login".into()))
            .unwrap_err();

        assert_eq!(err, NavigationError::MissingPrecedingSelection);
    }

    #[test]
    fn select_category_outside_service_is_rejected() {
        let kb = knowledge();
        let mut s = session();
        apply(&kb, &mut s, NavigationAction::SelectService("Login".into())).unwrap();

        // "Dashboard" exists, but under General, not Login.
        let err = apply(
            &kb,
            &mut s,
            NavigationAction::SelectCategory("Dashboard".into()),
        )
        .unwrap_err();

        assert!(matches!(err, NavigationError::InvalidSelection { kind: "category", .. }));
    }

    #[test]
    fn overview_is_never_selectable() {
        let kb = knowledge();
        let mut s = session();
        apply(&kb, &mut s, NavigationAction::SelectService("Login".into())).unwrap();

        let err = apply(
            &kb,
            &mut s,
            NavigationAction::SelectCategory("Overview".into()),
        )
        .unwrap_err();

        assert!(matches!(err, NavigationError::InvalidSelection { .. }));
    }

    #[test]
    fn select_question_returns_answer_and_appends_history() {
        let kb = knowledge();
        let mut s = session();
        apply(&kb, &mut s, NavigationAction::SelectService("Login".into())).unwrap();
        apply(&kb, &mut s, NavigationAction::SelectCategory("Login".into())).unwrap();

        let reply =
            apply(&kb, &mut s, NavigationAction::SelectQuestion("login_001".into())).unwrap();

        assert_eq!(reply.state, NavigationState::Answer);
        assert_eq!(reply.message, "Answer: What login methods exist?");
        assert_eq!(reply.service.as_deref(), Some("Login"));
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history()[0].question_id, "login_001");
    }

    #[test]
    fn unknown_question_is_not_found() {
        let kb = knowledge();
        let mut s = session();

        let err = apply(&kb, &mut s, NavigationAction::SelectQuestion("nope_999".into()))
            .unwrap_err();

        assert_eq!(err, NavigationError::QuestionNotFound("nope_999".to_string()));
        assert!(s.history().is_empty());
    }

    #[test]
    fn back_from_category_selection_clears_service() {
        let kb = knowledge();
        let mut s = session();
        apply(&kb, &mut s, NavigationAction::SelectService("Login".into())).unwrap();

        let reply = apply(&kb, &mut s, NavigationAction::Back).unwrap();

        assert_eq!(reply.state, NavigationState::ServiceSelection);
        assert_eq!(reply.services.unwrap(), vec!["General", "Login"]);
        assert!(s.current_service().is_none());
    }

    #[test]
    fn back_from_answer_re_renders_question_menu() {
        let kb = knowledge();
        let mut s = session();
        apply(&kb, &mut s, NavigationAction::SelectService("Login".into())).unwrap();
        apply(&kb, &mut s, NavigationAction::SelectCategory("Login".into())).unwrap();
        apply(&kb, &mut s, NavigationAction::SelectQuestion("login_001".into())).unwrap();

        let reply = apply(&kb, &mut s, NavigationAction::Back).unwrap();

        assert_eq!(reply.state, NavigationState::QuestionSelection);
        let questions = reply.questions.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "login_001");
        assert_eq!(s.current_category(), Some("Login"));
    }

    #[test]
    fn back_at_initial_state_re_renders_services() {
        let kb = knowledge();
        let mut s = session();

        let reply = apply(&kb, &mut s, NavigationAction::Back).unwrap();

        assert_eq!(reply.state, NavigationState::ServiceSelection);
        assert!(reply.services.is_some());
    }
}
