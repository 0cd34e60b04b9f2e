//! Hand-authored fallback texts.

pub const INTERVIEW: &str = "\
**Interview Preparation Tips**

**Technical Interviews**
• Work through coding problems on LeetCode or HackerRank, starting with the easy tier
• Refresh core data structures: arrays, linked lists, trees, graphs, hash maps
• Revisit common algorithms: sorting, searching, dynamic programming
• Be ready to reason about time and space complexity (Big O)

**Behavioral Interviews**
• Structure answers with the STAR method (Situation, Task, Action, Result)
• Prepare five to seven stories that show your strongest skills
• Rehearse your answers out loud

**General**
• Research the company and the team before the day
• Bring two or three thoughtful questions to ask
• Arrive early and show genuine enthusiasm";

pub const RESUME: &str = "\
**Resume Improvement Guide**

**Content**
• Open bullets with strong action verbs (Led, Built, Delivered, Implemented)
• Quantify achievements (\"cut build time by 40%\")
• Describe impact and results, not just duties
• Mirror the keywords of the job description

**Format**
• Keep it to one or two pages
• Use clear section headers: Experience, Education, Skills, Projects
• Pick a clean, ATS-friendly template with consistent fonts

**Sections**
• A two or three line professional summary at the top
• Relevant technical skills
• Work experience in reverse chronological order
• Education and certifications
• Notable projects with their tech stack";

pub const SKILLS: &str = "\
**Skill Development Strategy**

**Foundations for Software Engineering**
• Go deep on one language (Python, Java or JavaScript)
• Learn Git and a pull-request workflow
• Understand SQL and at least one NoSQL database
• Study system design basics alongside data structures and algorithms

**Learning Resources**
• freeCodeCamp for free, end-to-end curricula
• Coursera or edX for structured courses
• Official documentation for depth

**Practice**
• Ship three to five portfolio projects
• Contribute to open source on GitHub
• Write short technical posts to consolidate what you learn";

pub const JOB_SEARCH: &str = "\
**Job Search Strategy**

**Where to Apply**
• LinkedIn Jobs with saved alerts
• Company career pages directly
• Startup boards such as Wellfound
• Indeed, Glassdoor and regional boards
• Referrals, which convert best of all

**Application Tips**
• Apply to ten to fifteen roles a week, consistently
• Tailor your resume and cover letter to each posting
• Follow up after one to two weeks

**Networking**
• Reconnect with alumni and former colleagues
• Attend meetups and conferences in your field
• Ask for informational interviews";

pub const SALARY: &str = "\
**Salary Negotiation Tips**

**Research**
• Check Glassdoor, Levels.fyi and Payscale for market ranges
• Account for location, company size and seniority
• Decide your walk-away number in advance

**Timing**
• Avoid discussing numbers in the first interview
• Negotiate once you hold an offer
• Let the employer name the first figure when you can

**Negotiation**
• Lead with enthusiasm for the role
• Back your ask with data
• Weigh total compensation: base, bonus, equity and benefits
• Stay collaborative and rehearse beforehand

**Script:** \"I'm excited about this opportunity. Based on my research and experience, I was expecting a range of [X-Y]. Is there flexibility in the offer?\"";

pub const CAREER_CHANGE: &str = "\
**Career Transition Guide**

**Self-Assessment**
• List the transferable skills from your current role
• Research what the target field actually requires
• Plan for a realistic six to twelve month timeline

**Skill Building**
• Take focused online courses in the new field
• Build portfolio projects that prove the new skills
• Consider certifications or a bootcamp for intensive training

**Networking**
• Meet people already working in the target industry
• Find a mentor who made a similar move

**Applying**
• Put transferable skills front and center
• Explain the change briefly in your cover letter
• Be open to junior or adjacent roles at first";

pub const DEFAULT: &str = "\
**General Career Advice**

I can help with:
• **Resume/CV optimization**: content and format
• **Interview preparation**: technical and behavioral rounds
• **Skill development**: learning roadmaps and resources
• **Job search**: application strategy and networking
• **Career planning**: changing roles or moving up

**Quick Tips**
• Keep learning; the field moves fast
• Build a visible track record on GitHub, a blog or LinkedIn
• Network actively; many roles are filled through connections
• Keep a running log of your achievements

**Try asking:**
• \"How do I prepare for interviews?\"
• \"How can I improve my resume?\"
• \"What skills should I learn for [role]?\"
• \"How do I find jobs?\"
• \"How do I negotiate salary?\"";

pub const GREETING: &str = "\
Hello! I'm your career assistant.

I can help you with:
• Resume improvement and optimization
• Job search strategies
• Interview preparation
• Skill development paths
• Career planning

What would you like to know about your career?";

pub const THANKS: &str = "\
You're very welcome!

I'm here whenever you need help with resumes, interviews, job search or skill development.";

pub const OFF_TOPIC: &str = "\
I'm your career assistant, so I stick to career topics:
• Resume and CV optimization
• Job search strategies
• Interview preparation
• Skill development
• Career planning

Please ask me a career-related question!";
