use crate::models::{Conversation, QuestionRecord, QuestionType, Role, Turn};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Default location of the generated dataset
pub const DEFAULT_SAMPLE_PATH: &str = "longmemeval_small.json";

/// Short random question id, the first 8 characters of a v4 UUID
fn short_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// A two-turn user/assistant exchange
fn exchange(user: &str, assistant: &str) -> Conversation {
    vec![Turn::new(Role::User, user), Turn::new(Role::Assistant, assistant)]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Two hand-written questions in the LongMemEval layout
pub fn generate_sample_data() -> Vec<QuestionRecord> {
    let programming = QuestionRecord {
        question_id: short_id(),
        question_type: QuestionType::SingleSessionUser,
        question: "What programming language did I use for my first project?".to_string(),
        answer: "Python".to_string(),
        question_date: "2023/06/15 (Thu) 14:30".to_string(),
        haystack_dates: strings(&[
            "2023/06/10 (Sat) 09:15",
            "2023/06/12 (Mon) 16:45",
            "2023/06/14 (Wed) 11:20",
        ]),
        haystack_session_ids: strings(&["session_001", "session_002", "session_003"]),
        haystack_sessions: vec![
            exchange(
                "I'm thinking about learning to code. What language should I start with for my first project?",
                "Python is an excellent choice for beginners! It has clean syntax and is very readable. You can use it for web development, data analysis, automation, and much more. I'd recommend starting with Python for your first programming project.",
            ),
            exchange(
                "I've decided to go with Python for my first programming project. Can you help me think of a good beginner project?",
                "Great choice! For a first Python project, I'd suggest starting with something like a simple calculator, a to-do list app, or a basic web scraper. These projects will help you learn fundamental concepts like variables, functions, loops, and file handling.",
            ),
            exchange(
                "I'm making good progress on my Python project! It's really fun to see the code come together.",
                "That's wonderful to hear! Python is known for being beginner-friendly, and it sounds like you're experiencing that firsthand. Keep practicing and experimenting - that's the best way to improve your programming skills.",
            ),
        ],
        answer_session_ids: strings(&["answer_session_001"]),
    };

    let dinner_party = QuestionRecord {
        question_id: short_id(),
        question_type: QuestionType::SingleSessionUser,
        question: "What type of cuisine did I cook for my dinner party last month?".to_string(),
        answer: "Italian".to_string(),
        question_date: "2023/06/20 (Tue) 19:45".to_string(),
        haystack_dates: strings(&[
            "2023/05/18 (Thu) 15:30",
            "2023/05/22 (Mon) 12:15",
            "2023/05/25 (Thu) 18:00",
        ]),
        haystack_session_ids: strings(&["session_004", "session_005", "session_006"]),
        haystack_sessions: vec![
            exchange(
                "I'm planning a dinner party for next month and want to cook something special. Any cuisine recommendations?",
                "For a dinner party, Italian cuisine is always a crowd-pleaser! You could make homemade pasta with marinara sauce, garlic bread, and tiramisu for dessert. Italian food is comfort food that most people love, and it's great for sharing.",
            ),
            exchange(
                "I've decided to go with Italian for my dinner party! Can you help me plan a complete menu?",
                "Perfect choice! For an Italian dinner party, you could start with bruschetta or a caprese salad, serve homemade fettuccine alfredo or spaghetti carbonara as the main course, with garlic bread and a simple side salad. For dessert, tiramisu or panna cotta would be wonderful.",
            ),
            exchange(
                "I'm going shopping for ingredients for my Italian dinner party tomorrow. The menu looks amazing!",
                "How exciting! Make sure to get good quality ingredients - fresh basil, real parmesan cheese, and good olive oil will make a big difference. Don't forget wine for cooking and serving. Your guests are going to love the Italian feast you're preparing!",
            ),
        ],
        answer_session_ids: strings(&["answer_session_002"]),
    };

    vec![programming, dinner_party]
}

/// Write records as pretty-printed JSON, replacing any existing file
pub fn write_sample_data(records: &[QuestionRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize sample data")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write sample data to: {}", path.display()))?;
    info!(path = %path.display(), count = records.len(), "wrote sample data");

    Ok(())
}
