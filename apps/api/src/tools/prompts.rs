// Prompt templates and selection descriptions for the four coaching tools.
//
// Descriptions are read by the reasoning loop to decide which tool fits a
// request, so editing one changes routing behavior. Bump CATALOG_VERSION
// whenever a description or template changes.
//
// Every template carries exactly one `{input}` placeholder. The user's text
// is substituted verbatim; nothing is escaped, trimmed or validated.

pub const CATALOG_VERSION: &str = "1";

pub const INPUT_PLACEHOLDER: &str = "{input}";

// ─── Skills Gap Analyzer ────────────────────────────────────────────────────

pub const SKILLS_GAP_DESCRIPTION: &str =
    "Analyze the gap between a user's current skills and a target job's requirements \
    and generate a structured learning path. Use when user asks about skill gaps, \
    learning roadmap, or how to reach a specific role.";

pub const SKILLS_GAP_INPUT_HINT: &str = "Target Role: <role title>
Location: <city/country> (optional)
Years of Experience: <X> (optional)
User Skills:
- skill 1
- skill 2
Target Job Description:
<paste JD or bullets here>";

pub const SKILLS_GAP_TEMPLATE: &str = "
You are a senior career coach and technical mentor.

Task: Compare the user's current skills against the target job and identify:
1. Strong matches
2. Partial matches
3. Clear gaps
4. A step-by-step learning path (ordered roadmap) to close the gaps.
5. Recommended resources or practice project ideas.

Be concrete and structured. Use short sections and bullet points.

User & Job Info:
{input}
";

// ─── Resume Scorer ──────────────────────────────────────────────────────────

pub const RESUME_SCORER_DESCRIPTION: &str =
    "Score a resume out of 10 for a target role and provide detailed, actionable feedback. \
    Use when user asks to evaluate, review, or improve a resume or CV.";

pub const RESUME_SCORER_INPUT_HINT: &str = "Target Role: <role>
Resume:
<paste resume text or bullet points>";

pub const RESUME_SCORER_TEMPLATE: &str = "
You are an expert resume reviewer for top tech companies.

Task:
1. Score the resume out of 10 for the specified target role.
2. Briefly explain the score.
3. List concrete, actionable improvements:
   - content (projects, impact, metrics)
   - structure & clarity
   - keywords & ATS-friendliness
4. Provide a revised sample bullet or small section as an example.

Be concise but specific.

Input:
{input}
";

// ─── Salary Estimator ───────────────────────────────────────────────────────

pub const SALARY_ESTIMATOR_DESCRIPTION: &str =
    "Estimate a realistic salary range based on job title, location, and years of experience. \
    Use when user asks about expected salary, salary range, or compensation.";

pub const SALARY_ESTIMATOR_INPUT_HINT: &str = "Job Title: <title>
Location: <city/country>
Years of Experience: <X>
Notes: <industry / company type / remote etc.> (optional)";

pub const SALARY_ESTIMATOR_TEMPLATE: &str = "
You are a career and compensation advisor.

Task:
1. Estimate a realistic **base salary range** for this profile (low, median, high).
2. Specify the assumed currency clearly.
3. Mention factors that affect the range:
   - company size (startup vs big tech),
   - cost of living at the location,
   - skills & specialization,
   - remote vs on-site.
4. Add a short note on how the user can validate/adjust this range using public sources.

Be explicit that this is an approximate estimate, not official or guaranteed.

Profile:
{input}
";

// ─── Interview Question Generator ───────────────────────────────────────────

pub const INTERVIEW_QUESTIONS_DESCRIPTION: &str =
    "Generate technical and behavioral interview questions for a given role and difficulty. \
    Use when user wants practice questions or mock interview preparation.";

pub const INTERVIEW_QUESTIONS_INPUT_HINT: &str = "Role: <e.g., Data Scientist, Backend Engineer>
Level: <e.g., junior / mid / senior / intern>
Focus Areas (optional): <e.g., SQL, Python, system design, ML basics>
Question Types: <technical / behavioral / both>
Number of Questions: <e.g., 10>";

pub const INTERVIEW_QUESTIONS_TEMPLATE: &str = "
You are an expert interviewer.

Task:
1. Generate interview questions for the given role and level.
2. Include the requested mix of technical and/or behavioral questions.
3. Group questions by category (e.g., Technical - Python, Technical - SQL, Behavioral).
4. For each question, optionally add:
   - a short hint or what the interviewer is looking for,
   - difficulty tag (easy/medium/hard).

Input:
{input}
";
