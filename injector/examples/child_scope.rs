use fibre_injector::{bind, class, injectable, Injector, Token};
use std::sync::Arc;

struct Config {
  environment: &'static str,
}

struct Database {
  url: String,
}

impl Database {
  fn connect(config: &Config) -> Self {
    Database {
      url: format!("postgres://{}.db.local/app", config.environment),
    }
  }
}

struct RequestHandler {
  db: Arc<Database>,
  user: Arc<String>,
}
injectable!(RequestHandler {
  db: Database,
  user: String => "user",
});

fn handle(request: &Injector) -> String {
  let handler = request.get_type::<RequestHandler>().unwrap();
  format!("{} served from {}", handler.user, handler.db.url)
}

fn main() {
  // Application-wide singletons live in the root injector.
  let app = Injector::new([
    bind(Token::of::<Config>()).to_value(Config { environment: "staging" }),
    bind(Token::of::<Database>()).to_factory([Token::of::<Config>()], |args| {
      Ok(Database::connect(&*args.next::<Config>()?))
    }),
  ])
  .unwrap();

  // Every request gets a child injector with its own handler and user.
  for user in ["alice", "bob"] {
    let request = app
      .create_child([
        class::<RequestHandler>(),
        bind("user").to_value(user.to_string()),
      ])
      .unwrap();
    println!("{}", handle(&request));
  }

  // The children shared the root's database; the root never saw a handler.
  println!("Database cached in root: {}", app.is_cached(&Token::of::<Database>()));
  assert!(app.get_type::<RequestHandler>().is_err());
}
