//! Turning log templates into sentences
//!
//! Templates name participants by position (`{1}`, `{2}`) and mark verb
//! agreement with brackets: `[are|is]` picks by whether the subject is the
//! hero, and a lone `[s]` is a suffix only third persons take. A participant
//! mentioned a second time is referred to reflexively.

use hashbrown::HashMap;

use delve_core::monster::Pronoun;
use delve_core::{ActorId, LogEntry};

#[derive(Debug)]
pub struct Narrator {
    hero: ActorId,
    names: HashMap<ActorId, (String, Pronoun)>,
}

impl Narrator {
    pub fn new(hero: ActorId) -> Self {
        Self {
            hero,
            names: HashMap::new(),
        }
    }

    /// Remember a name so it can still be used after the actor is gone.
    pub fn introduce(&mut self, id: ActorId, name: &str, pronoun: Pronoun) {
        self.names.insert(id, (name.to_string(), pronoun));
    }

    fn noun(&self, id: ActorId) -> String {
        if id == self.hero {
            return "you".to_string();
        }
        match self.names.get(&id) {
            Some((name, _)) => format!("the {name}"),
            None => format!("something ({id})"),
        }
    }

    fn reflexive(&self, id: ActorId) -> &'static str {
        if id == self.hero {
            return "yourself";
        }
        self.names
            .get(&id)
            .map_or(Pronoun::It, |&(_, pronoun)| pronoun)
            .reflexive()
    }

    pub fn render(&self, entry: &LogEntry) -> String {
        let second_person = entry.participants.first() == Some(&self.hero);
        let mut out = String::with_capacity(entry.template.len() + 16);
        let mut chars = entry.template.chars();
        let mut mentioned: Vec<ActorId> = Vec::new();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    let slot: String = chars.by_ref().take_while(|&c| c != '}').collect();
                    let participant = slot
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|n| entry.participants.get(n).copied());
                    match participant {
                        Some(id) if mentioned.contains(&id) => out.push_str(self.reflexive(id)),
                        Some(id) => {
                            mentioned.push(id);
                            out.push_str(&self.noun(id));
                        }
                        None => out.push_str("something"),
                    }
                }
                '[' => {
                    let form: String = chars.by_ref().take_while(|&c| c != ']').collect();
                    match form.split_once('|') {
                        Some((you, other)) => out.push_str(if second_person { you } else { other }),
                        None if !second_person => out.push_str(&form),
                        None => {}
                    }
                }
                _ => out.push(c),
            }
        }

        capitalize(&out)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
