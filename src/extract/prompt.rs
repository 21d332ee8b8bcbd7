use super::ExtractionRequest;

const IN_KEYWORDS: &str = "In, Reached, Aagaye, Start, Present, Duty start, Sewa start";
const OUT_KEYWORDS: &str = "Out, Done, Leaving, Sewa samapt, Ghar, Left, Off, Duty off";

/// Instructions sent along with the transcript.
pub fn build_prompt(req: &ExtractionRequest) -> String {
    let roster = req
        .roster
        .iter()
        .map(|(id, name)| format!("ID: {id}, Name: {name}"))
        .collect::<Vec<_>>()
        .join("\n");

    let transcript_heading = if req.truncated {
        "TRANSCRIPT (most recent part of the log)"
    } else {
        "TRANSCRIPT"
    };

    format!(
        r#"You keep the attendance register of the "{team}" volunteer group.
Read the chat transcript below and list every check-in ("IN") and check-out ("OUT")
message of the attendance day {date}.

ATTENDANCE DAY
- begins: {start}
- ends:   {end}
Only messages stamped inside this interval count. Earlier messages belong to the
previous day, later ones to the next day: leave both out. Timestamps may use any
common date layout (22/02/26, 02/22/26, [22/02/26, ...]).

VOLUNTEERS
{roster}

{transcript_heading}
{transcript}

TIME
- Take the time from the message timestamp at the start of the line, e.g.
  "[12/02/24, 10:15:22 AM] Name: In" gives "10:15".
- Ignore times written inside the message body.
- Write the time as 24-hour HH:mm.

DIRECTION
- IN words: {in_kw}.
- OUT words: {out_kw}.
- A message about going home or finishing sewa is an OUT.

ANSWER
A JSON array, one object per message:
{{
  "rawName": "name as written in the chat",
  "matchedSewadarId": "ID from VOLUNTEERS, or null when unsure",
  "type": "IN" | "OUT",
  "time": "HH:mm",
  "counter": "counter / location if mentioned, or null",
  "confidence": number between 0.0 and 1.0
}}
Answer [] when nothing falls between {start} and {end}."#,
        team = req.team_name,
        date = req.date,
        start = req.window_start,
        end = req.window_end,
        roster = roster,
        transcript_heading = transcript_heading,
        transcript = req.transcript,
        in_kw = IN_KEYWORDS,
        out_kw = OUT_KEYWORDS,
    )
}
