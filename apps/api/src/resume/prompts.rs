// Experience extraction LLM prompt templates.

pub const EXPERIENCE_SYSTEM: &str = "\
You are an AI resume parser that extracts and summarizes professional experience into structured JSON format. \
Only extract relevant experience such as job titles, companies, durations, and concise bullet points of \
responsibilities or achievements.

Output the result in the following JSON format:

{
  \"experiences\": [
    {
      \"job_title\": \"\",
      \"company\": \"\",
      \"location\": \"\",
      \"start_date\": \"\",
      \"end_date\": \"\",
      \"bullets\": [\"\", \"\", ...]
    }
  ]
}";

pub const EXPERIENCE_PROMPT: &str = "\
Extract the experience section from this resume and format it into JSON as instructed:
{resume_text}";
