mod quiz;

pub use quiz::{QuizBoard, QuizView};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
