mod insight_tests;
mod streak_tests;
