use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use yt_digest::Summarizer;

/// Replays scripted outcomes in order; the last one repeats once the script
/// runs out.
#[derive(Clone)]
pub struct MockSummarizer {
    pub script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub panic_with: Option<String>,
}

impl MockSummarizer {
    pub fn scripted(outcomes: Vec<Result<&str, &str>>) -> Self {
        let script = outcomes
            .into_iter()
            .map(|o| o.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            script: Arc::new(Mutex::new(script)),
            calls: Arc::new(Mutex::new(Vec::new())),
            panic_with: None,
        }
    }

    pub fn new(response: &str) -> Self {
        Self::scripted(vec![Ok(response)])
    }

    pub fn failing(msg: &str) -> Self {
        Self::scripted(vec![Err(msg)])
    }

    pub fn panicking(msg: &str) -> Self {
        Self {
            panic_with: Some(msg.to_string()),
            ..Self::new("unused")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Summarizer for MockSummarizer {
    type Error = anyhow::Error;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(prompt.to_string());
        if let Some(ref msg) = self.panic_with {
            panic!("{}", msg);
        }

        let mut script = self.script.lock().unwrap();
        let outcome = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };

        match outcome {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(anyhow::anyhow!("{}", msg)),
            None => Err(anyhow::anyhow!("no scripted response")),
        }
    }
}
