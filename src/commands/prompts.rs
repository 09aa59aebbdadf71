pub const GENERATE_TRANSCRIPT_PROMPT: &str = "Generate a fictional sales call transcript. Here is an example of what a transcript format should look like:

00:00:00 Sam (openai.com): Hey there Satya.
00:00:02 Satya (microsoft.com): Hi Sam, how are you?
00:00:05 Sam (openai.com): I'm doing good. Do you think you can give us 10000 more GPUs?
00:00:06 Satya (microsoft.com): I'm sorry Sam we can't do 10000, how about 5000?

Your response should include only the transcript and nothing else.";

pub const SUMMARIZE_SYSTEM_PROMPT: &str = "You are an AI meeting assistant that reads a sales call transcript as input and responds with a summary of the key points from the call.";

pub const ANSWER_SYSTEM_PROMPT: &str = "You are an AI assistant who will answer user questions in relation to a provided sales call transcript.";
