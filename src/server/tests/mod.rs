mod helpers;
mod failure_injection;
mod mock_llm;
