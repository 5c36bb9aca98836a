use std::sync::Mutex;

/// Sink for everything the demo tells the user.
pub trait Narrator: Send + Sync {
    fn say(&self, text: &str);
}

/// Prints narration to stdout.
pub struct Console;

impl Narrator for Console {
    fn say(&self, text: &str) {
        println!("{text}");
    }
}

/// Records narration in memory.
#[derive(Default)]
pub struct Transcript {
    lines: Mutex<Vec<String>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything said so far, one entry per `say` call.
    pub fn entries(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        self.entries().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }
}

impl Narrator for Transcript {
    fn say(&self, text: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(text.to_string());
        }
    }
}

impl<N: Narrator + ?Sized> Narrator for &N {
    fn say(&self, text: &str) {
        (**self).say(text);
    }
}
