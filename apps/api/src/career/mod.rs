// Career assistant features: résumé review, skill gap, job search, ask.
// One pipeline serves all of them: tokenize → lookup-or-forward → analyze/rank → present.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
