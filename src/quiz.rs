//! Quiz question endpoints.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::client::{AsyncClient, BlockingClient};
use crate::endpoint::{Endpoint, Method, endpoints};
use crate::error::{Error, Result};
use crate::service::Quiz;
use crate::transport::{AsyncTransport, BlockingTransport};

/// Smallest and largest number of questions one quiz request may ask for.
pub const QUIZ_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=15;

const QUIZ: Endpoint = Endpoint {
    method: Method::Get,
    path: "/api/v1/quiz",
    params: &["QuizType", "size"],
};

/// Question pools served by `/api/v1/quiz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizCategory {
    Anime,
    Games,
    WorldCapital,
    Python,
    Biology,
    Cpp,
    C,
}

impl QuizCategory {
    pub const ALL: [QuizCategory; 7] = [
        QuizCategory::Anime,
        QuizCategory::Games,
        QuizCategory::WorldCapital,
        QuizCategory::Python,
        QuizCategory::Biology,
        QuizCategory::Cpp,
        QuizCategory::C,
    ];

    /// Value of the `QuizType` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            QuizCategory::Anime => "Anime",
            QuizCategory::Games => "Games",
            QuizCategory::WorldCapital => "WorldCapital",
            QuizCategory::Python => "Python",
            QuizCategory::Biology => "Biology",
            QuizCategory::Cpp => "Cpp",
            QuizCategory::C => "C",
        }
    }
}

impl fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct QuizReply {
    #[serde(default)]
    questions: Vec<Value>,
}

fn check_size(size: u32) -> Result<String> {
    if !QUIZ_SIZE_RANGE.contains(&size) {
        return Err(Error::Validation(format!(
            "quiz size must be between {} and {}, got {}",
            QUIZ_SIZE_RANGE.start(),
            QUIZ_SIZE_RANGE.end(),
            size
        )));
    }
    Ok(size.to_string())
}

fn questions(data: Value) -> Result<Vec<Value>> {
    // A non-object reply or a non-array `questions` is not something we can hand back.
    serde_json::from_value::<QuizReply>(data)
        .map(|reply| reply.questions)
        .map_err(|e| Error::Decode {
            status: 200,
            reason: format!("unexpected quiz payload: {}", e),
        })
}

endpoints! {
    Quiz;
    extra get_quiz => QUIZ;

    /// All quiz collections and the number of questions in each.
    fn get_collections_info() => Get "/api/v1/quiz/collections";
    /// Overall API status.
    fn check_status() => Get "/api/v1/status";
    fn is_key_validate() => Get "/api/v1/quiz/validate_key";
    /// Author details and API metadata.
    fn get_author_info() => Get "/api/v1/author";
}

impl<T: AsyncTransport> AsyncClient<Quiz, T> {
    /// Up to `size` questions from `category`. `size` must lie in
    /// [`QUIZ_SIZE_RANGE`]; anything else fails before a request is sent.
    pub async fn get_quiz(&mut self, category: QuizCategory, size: u32) -> Result<Vec<Value>> {
        let size = check_size(size)?;
        let data = self.call(&QUIZ, &[category.as_str(), size.as_str()]).await?;
        questions(data)
    }
}

impl<T: BlockingTransport> BlockingClient<Quiz, T> {
    /// Up to `size` questions from `category`. `size` must lie in
    /// [`QUIZ_SIZE_RANGE`]; anything else fails before a request is sent.
    pub fn get_quiz(&mut self, category: QuizCategory, size: u32) -> Result<Vec<Value>> {
        let size = check_size(size)?;
        let data = self.call(&QUIZ, &[category.as_str(), size.as_str()])?;
        questions(data)
    }
}

macro_rules! category_methods {
    ($($name:ident => $category:ident),* $(,)?) => {
        impl<T: AsyncTransport> AsyncClient<Quiz, T> {
            $(
                #[doc = concat!("Questions from the `", stringify!($category), "` pool.")]
                pub async fn $name(&mut self, size: u32) -> Result<Vec<Value>> {
                    self.get_quiz(QuizCategory::$category, size).await
                }
            )*
        }

        impl<T: BlockingTransport> BlockingClient<Quiz, T> {
            $(
                #[doc = concat!("Questions from the `", stringify!($category), "` pool.")]
                pub fn $name(&mut self, size: u32) -> Result<Vec<Value>> {
                    self.get_quiz(QuizCategory::$category, size)
                }
            )*
        }
    };
}

category_methods! {
    get_anime_quiz => Anime,
    get_games_quiz => Games,
    get_world_capital_quiz => WorldCapital,
    get_python_quiz => Python,
    get_biology_quiz => Biology,
    get_cpp_quiz => Cpp,
    get_c_quiz => C,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::service::Service;
    use crate::transport::stub::StubTransport;
    use serde_json::json;

    fn blocking(stub: StubTransport) -> BlockingClient<Quiz, StubTransport> {
        let url = Quiz::DEFAULT_BASE_URL.unwrap();
        BlockingClient::with_transport(ClientConfig::new(url, "quiz-key"), stub).unwrap()
    }

    fn non_blocking(stub: StubTransport) -> AsyncClient<Quiz, StubTransport> {
        AsyncClient::with_transport(ClientConfig::new("http://quiz.local", "quiz-key"), stub)
            .unwrap()
    }

    #[test]
    fn sizes_in_range_reach_the_server() {
        let mut client = blocking(StubTransport::json(200, r#"{"questions":[]}"#));
        for size in QUIZ_SIZE_RANGE {
            client.get_anime_quiz(size).unwrap();
            assert_eq!(
                client.transport().last().param("size"),
                Some(size.to_string().as_str())
            );
        }
        assert_eq!(client.transport().requests.len(), 15);
    }

    #[test]
    fn sizes_out_of_range_never_touch_the_transport() {
        let mut client = blocking(StubTransport::ok());
        for size in [0, 16, 100, u32::MAX] {
            let err = client.get_games_quiz(size).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{err:?}");
        }
        assert!(client.transport().requests.is_empty());
        assert_eq!(client.transport().opens, 0);
    }

    #[tokio::test]
    async fn async_validation_happens_before_io() {
        let mut client = non_blocking(StubTransport::ok());
        let err = client.get_c_quiz(0).await.unwrap_err();
        assert!(err.to_string().contains("between 1 and 15"), "{err}");
        assert!(client.transport().requests.is_empty());
    }

    #[test]
    fn python_quiz_returns_questions_verbatim() {
        let body = json!({
            "questions": [
                {"q": "len([])?", "a": "0"},
                {"q": "type(1)?", "a": "int"},
                {"q": "2**3?", "a": "8"}
            ],
            "count": 3
        });
        let mut client = blocking(StubTransport::json(200, &body.to_string()));

        let questions = client.get_python_quiz(3).unwrap();
        assert_eq!(questions, body["questions"].as_array().unwrap().clone());

        let req = client.transport().last();
        assert_eq!(req.url, "https://taskora.onrender.com/api/v1/quiz");
        assert_eq!(req.param("QuizType"), Some("Python"));
        assert_eq!(req.param("size"), Some("3"));
        assert_eq!(req.param("apikey"), Some("quiz-key"));
    }

    #[tokio::test]
    async fn missing_questions_is_an_empty_list() {
        let mut client = non_blocking(StubTransport::json(200, "{}"));
        let questions = client.get_python_quiz(3).await.unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn malformed_questions_is_a_decode_error() {
        let mut client = blocking(StubTransport::json(200, r#"{"questions":"soon"}"#));
        let err = client.get_biology_quiz(2).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }

    #[test]
    fn each_category_method_sends_its_quiz_type() {
        let mut client = blocking(StubTransport::ok());
        client.get_anime_quiz(1).unwrap();
        client.get_games_quiz(1).unwrap();
        client.get_world_capital_quiz(1).unwrap();
        client.get_python_quiz(1).unwrap();
        client.get_biology_quiz(1).unwrap();
        client.get_cpp_quiz(1).unwrap();
        client.get_c_quiz(1).unwrap();

        let sent: Vec<&str> = client
            .transport()
            .requests
            .iter()
            .map(|r| r.param("QuizType").unwrap())
            .collect();
        let expected: Vec<&str> = QuizCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(sent, expected);
    }

    #[test]
    fn metadata_endpoints_carry_the_key() {
        let mut client = blocking(StubTransport::json(200, r#"{"status":"ok"}"#));
        assert_eq!(client.check_status().unwrap(), json!({"status": "ok"}));
        client.get_author_info().unwrap();
        client.get_collections_info().unwrap();
        client.is_key_validate().unwrap();

        let urls: Vec<&str> = client
            .transport()
            .requests
            .iter()
            .map(|r| r.url.as_str())
            .collect();
        assert_eq!(
            urls,
            [
                "https://taskora.onrender.com/api/v1/status",
                "https://taskora.onrender.com/api/v1/author",
                "https://taskora.onrender.com/api/v1/quiz/collections",
                "https://taskora.onrender.com/api/v1/quiz/validate_key",
            ]
        );
        assert!(
            client
                .transport()
                .requests
                .iter()
                .all(|r| r.param("apikey") == Some("quiz-key"))
        );
    }

    #[test]
    fn endpoint_table_lists_the_quiz_route() {
        let (_, quiz) = ENDPOINTS
            .iter()
            .find(|(name, _)| *name == "get_quiz")
            .expect("get_quiz in table");
        assert_eq!(quiz.path, "/api/v1/quiz");
        assert_eq!(quiz.method, Method::Get);
        assert_eq!(quiz.params, &["QuizType", "size"]);
        assert_eq!(ENDPOINTS.len(), 5);
    }

    #[test]
    fn server_errors_propagate_from_quiz_calls() {
        let mut client = blocking(StubTransport::json(429, r#"{"detail":"limit reached"}"#));
        let err = client.get_cpp_quiz(5).unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("limit reached"));
    }
}
