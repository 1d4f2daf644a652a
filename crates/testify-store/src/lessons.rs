use std::collections::HashMap;

use testify_types::models::{Difficulty, Lesson, Question, StudyDomain};

/// Read-only lesson content, grouped by study domain.
pub struct LessonCatalog {
    lessons: HashMap<StudyDomain, Vec<Lesson>>,
}

/// Outcome of checking a set of answers against a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub correct: usize,
    pub total: usize,
}

impl Grade {
    pub fn passed(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl LessonCatalog {
    pub fn builtin() -> Self {
        let mut lessons = HashMap::new();
        lessons.insert(StudyDomain::Bible, bible_lessons());
        lessons.insert(StudyDomain::Jesus, jesus_lessons());
        lessons.insert(StudyDomain::Kings, kings_lessons());
        lessons.insert(StudyDomain::Mythology, mythology_lessons());
        Self { lessons }
    }

    pub fn list(&self, domain: StudyDomain) -> &[Lesson] {
        self.lessons.get(&domain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, domain: StudyDomain, id: &str) -> Option<&Lesson> {
        self.list(domain).iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.lessons.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compare answers position by position; missing answers count as wrong and
/// extra answers are ignored.
pub fn grade(lesson: &Lesson, answers: &[usize]) -> Grade {
    let correct = lesson
        .questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| q.correct_answer == **a)
        .count();
    Grade {
        correct,
        total: lesson.questions.len(),
    }
}

fn question(text: &str, options: &[&str], correct_answer: usize) -> Question {
    Question {
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
    }
}

fn lesson(
    id: &str,
    title: &str,
    content: &str,
    questions: Vec<Question>,
    reward: &str,
    difficulty: Difficulty,
) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        questions,
        reward: reward.to_string(),
        difficulty,
    }
}

fn bible_lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "bible-creation",
            "In the Beginning",
            "Genesis opens with the account of creation over six days, followed by a day of rest.",
            vec![
                question("On which day did God rest?", &["Fifth", "Sixth", "Seventh", "First"], 2),
                question("What is the first book of the Bible?", &["Exodus", "Genesis", "Psalms", "John"], 1),
            ],
            "10",
            Difficulty::Beginner,
        ),
        lesson(
            "bible-exodus",
            "Out of Egypt",
            "Moses leads the Israelites out of slavery in Egypt and receives the law at Mount Sinai.",
            vec![
                question("Who led the Israelites out of Egypt?", &["Abraham", "David", "Moses", "Joshua"], 2),
                question("Where was the law given?", &["Mount Sinai", "Mount Zion", "Mount Carmel", "Mount Ararat"], 0),
            ],
            "15",
            Difficulty::Intermediate,
        ),
    ]
}

fn jesus_lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "jesus-birth",
            "The Nativity",
            "Jesus is born in Bethlehem to Mary and Joseph, and is visited by shepherds and magi.",
            vec![
                question("Where was Jesus born?", &["Nazareth", "Jerusalem", "Bethlehem", "Capernaum"], 2),
                question("Who visited from the east?", &["Prophets", "Magi", "Priests", "Soldiers"], 1),
            ],
            "10",
            Difficulty::Beginner,
        ),
        lesson(
            "jesus-sermon",
            "The Sermon on the Mount",
            "Matthew 5-7 gathers the Beatitudes, the Lord's Prayer, and teaching on the law.",
            vec![
                question("Which gospel records the Sermon on the Mount?", &["Mark", "Matthew", "John", "Acts"], 1),
                question("Who are called the salt of the earth?", &["The disciples", "The priests", "The kings", "The Romans"], 0),
            ],
            "15",
            Difficulty::Intermediate,
        ),
    ]
}

fn kings_lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "kings-saul",
            "The First King",
            "Saul is anointed by Samuel as the first king of Israel.",
            vec![
                question("Who anointed Saul?", &["Samuel", "Nathan", "Elijah", "Eli"], 0),
                question("From which tribe was Saul?", &["Judah", "Levi", "Benjamin", "Dan"], 2),
            ],
            "10",
            Difficulty::Beginner,
        ),
        lesson(
            "kings-solomon",
            "The Wisdom of Solomon",
            "Solomon asks for wisdom, builds the temple in Jerusalem, and the kingdom divides after his death.",
            vec![
                question("What did Solomon ask God for?", &["Riches", "Long life", "Wisdom", "Victory"], 2),
                question("What did Solomon build in Jerusalem?", &["A palace only", "The temple", "A wall", "An ark"], 1),
                question("Who succeeded Solomon?", &["Rehoboam", "Jeroboam", "Asa", "Ahab"], 0),
            ],
            "20",
            Difficulty::Advanced,
        ),
    ]
}

fn mythology_lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "mythology-olympians",
            "The Olympians",
            "The twelve Olympians ruled from Mount Olympus under Zeus.",
            vec![
                question("Who ruled the Olympians?", &["Poseidon", "Hades", "Zeus", "Apollo"], 2),
                question("Who was the goddess of wisdom?", &["Athena", "Hera", "Artemis", "Aphrodite"], 0),
            ],
            "10",
            Difficulty::Beginner,
        ),
        lesson(
            "mythology-norse",
            "Yggdrasil and the Nine Worlds",
            "Norse cosmology places nine worlds around the world tree Yggdrasil.",
            vec![
                question("What is the name of the world tree?", &["Bifrost", "Yggdrasil", "Asgard", "Mjolnir"], 1),
                question("Which world do humans inhabit?", &["Midgard", "Jotunheim", "Niflheim", "Vanaheim"], 0),
            ],
            "15",
            Difficulty::Intermediate,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_domain_has_lessons() {
        let catalog = LessonCatalog::builtin();
        for domain in StudyDomain::ALL {
            assert!(!catalog.list(domain).is_empty(), "{domain} has no lessons");
        }
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn answer_indexes_are_in_range() {
        let catalog = LessonCatalog::builtin();
        for domain in StudyDomain::ALL {
            for lesson in catalog.list(domain) {
                for q in &lesson.questions {
                    assert!(q.correct_answer < q.options.len(), "{}", lesson.id);
                }
            }
        }
    }

    #[test]
    fn get_is_scoped_to_domain() {
        let catalog = LessonCatalog::builtin();
        assert!(catalog.get(StudyDomain::Bible, "bible-creation").is_some());
        assert!(catalog.get(StudyDomain::Kings, "bible-creation").is_none());
    }

    #[test]
    fn grading() {
        let catalog = LessonCatalog::builtin();
        let lesson = catalog.get(StudyDomain::Kings, "kings-solomon").unwrap();

        let all_right = grade(lesson, &[2, 1, 0]);
        assert_eq!(all_right, Grade { correct: 3, total: 3 });
        assert!(all_right.passed());

        let partial = grade(lesson, &[2]);
        assert_eq!(partial.correct, 1);
        assert!(!partial.passed());

        let extra = grade(lesson, &[2, 1, 0, 3]);
        assert!(extra.passed());
    }
}
