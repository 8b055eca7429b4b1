use colored::Colorize;
use crate::food::FoodSearchService;

pub mod food_cmd;
pub mod system;

pub struct CommandHandler {
    service: FoodSearchService,
    max_results: usize,
}

impl CommandHandler {
    pub fn new(service: FoodSearchService, max_results: usize) -> Self {
        Self { service, max_results }
    }

    /// Run one line of input. Returns `false` once the user asked to leave.
    pub async fn handle_command(&self, input: &str) -> Result<bool, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(true);
        }

        if system::is_exit(input) {
            return Ok(false);
        }

        if input.eq_ignore_ascii_case("help") {
            println!("{}", system::help_text());
            return Ok(true);
        }

        let output = food_cmd::handle_command(input, &self.service, self.max_results).await?;
        println!("{}", output.truecolor(255, 236, 179));
        Ok(true)
    }
}
