use crate::domain::ports::{Choice, Navigator, Notifier, Route};
use std::io::{BufRead, Write};

/// Terminal notifier. Toasts go to a single line; modals print a titled
/// block. In non-interactive mode every confirm resolves to Cancel so
/// scripted runs never hang on a prompt.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    interactive: bool,
}

impl ConsoleNotifier {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Notifier for ConsoleNotifier {
    fn toast(&self, message: &str) {
        println!("» {}", message);
    }

    fn alert(&self, title: &str, content: &str) {
        println!("[{}]", title);
        println!("{}", content);
    }

    fn confirm(
        &self,
        title: &str,
        content: &str,
        confirm_label: &str,
        cancel_label: &str,
    ) -> Choice {
        println!("[{}]", title);
        println!("{}", content);
        if !self.interactive {
            return Choice::Cancel;
        }

        print!("{} / {} [y/N]: ", confirm_label, cancel_label);
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(_) if line.trim().eq_ignore_ascii_case("y") => Choice::Confirm,
            _ => Choice::Cancel,
        }
    }
}

/// The CLI has no page stack, so "back" never succeeds and navigation is
/// advisory: it tells the user which command to run next.
#[derive(Debug, Clone, Default)]
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn back(&self) -> bool {
        false
    }

    fn navigate_to(&self, route: Route) {
        match route {
            Route::PatientInfo => println!("→ run `clinic-client info` to view your profile"),
            Route::Login => println!("→ run `clinic-client login` to sign in"),
        }
    }

    fn redirect_to(&self, route: Route) {
        self.navigate_to(route);
    }
}
