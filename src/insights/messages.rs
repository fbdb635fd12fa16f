/// Message and affirmation pools

pub const EMPTY_STATE_MESSAGE: &str = "Start your wellness journey by tracking your habits!";

pub const AFFIRMATIONS: [&str; 10] = [
    "You're building something amazing, one day at a time!",
    "Every small step counts - you've got this!",
    "Consistency is your superpower!",
    "You're stronger than you think!",
    "Progress, not perfection - you're doing great!",
    "Your future self will thank you for today!",
    "You're creating positive change in your life!",
    "Keep going - you're on the right track!",
    "Small daily improvements lead to big results!",
    "You're capable of incredible things!",
];

pub const HIGH_STREAK: [&str; 3] = [
    "🔥 Incredible! You're on fire with your streaks!",
    "🌟 Outstanding consistency! You're a habit master!",
    "💪 Your dedication is inspiring! Keep it up!",
];

pub const MEDIUM_STREAK: [&str; 3] = [
    "✨ Great progress! You're building momentum!",
    "🎯 You're doing well! Keep the consistency going!",
    "📈 Nice work! Your habits are taking shape!",
];

pub const LOW_STREAK: [&str; 3] = [
    "🌱 Every journey starts with a single step!",
    "💫 You're getting started - that's the hardest part!",
    "🚀 Building new habits takes time - you've got this!",
];

pub const MISSED_DAYS: [&str; 3] = [
    "🔄 Don't worry about yesterday - focus on today!",
    "💪 One missed day doesn't break your progress!",
    "🌟 Get back on track - you can do this!",
];
